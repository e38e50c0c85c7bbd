//! Claim catalog: the fixed vocabulary of claim types administrators pick from

/// Every claim type the back-office offers on its add-claim screens
pub const CLAIM_CATALOG: &[&str] = &[
    "CanAddPie",
    "CanEditPie",
    "CanDeletePie",
    "CanEditPrices",
    "CanManageCategories",
    "CanManageOrders",
    "CanViewReports",
    "CanManageUsers",
];

/// Read-only view over [`CLAIM_CATALOG`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimCatalog;

impl ClaimCatalog {
    pub fn all(&self) -> Vec<String> {
        CLAIM_CATALOG.iter().map(|c| c.to_string()).collect()
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, claim_type: &str) -> bool {
        CLAIM_CATALOG.contains(&claim_type)
    }
}
