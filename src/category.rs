//! Export categories and their literal file-name prefixes.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Kind of export file; each one is released independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Redemption,
    Outpay,
    OwnAndBen,
}

// (category, payload name, route slug, file-name prefix)
static TABLE: [(Category, &str, &str, &str); Category::COUNT] = [
    (Category::Redemption, "REDEMPTION", "redemption", "redemption_"),
    (Category::Outpay, "OUTPAY", "outpay", "outpay_"),
    (Category::OwnAndBen, "OWN_AND_BEN", "own-and-ben", "own_and_ben_"),
];

impl Category {
    pub const COUNT: usize = 3;
    pub const ALL: [Category; Self::COUNT] = [Category::Redemption, Category::Outpay, Category::OwnAndBen];

    #[inline]
    fn row(self) -> &'static (Category, &'static str, &'static str, &'static str) {
        // TABLE is ordered like the enum discriminants.
        &TABLE[self as usize]
    }

    /// Upper-case tag used in response payloads and log fields.
    pub fn name(self) -> &'static str {
        self.row().1
    }

    /// Route segment for the on-demand trigger.
    pub fn slug(self) -> &'static str {
        self.row().2
    }

    /// Literal prefix a staged file name must start with.
    pub fn prefix(self) -> &'static str {
        self.row().3
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the slug (`own-and-ben`), the payload name (`OWN_AND_BEN`)
    /// or snake case (`own_and_ben`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        TABLE
            .iter()
            .find(|(_, name, _, _)| name.to_ascii_lowercase() == wanted)
            .map(|(c, _, _, _)| *c)
            .ok_or_else(|| format!("unknown export category: '{s}'"))
    }
}
