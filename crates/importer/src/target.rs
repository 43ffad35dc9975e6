use std::fmt;

/// The server resource a CSV file is imported into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportTarget {
    Categories,
    Transactions,
}

impl ImportTarget {
    pub const ALL: [ImportTarget; 2] = [Self::Categories, Self::Transactions];

    /// Path of the import route, relative to the server base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Categories => "api/categories/csv_import",
            Self::Transactions => "api/transaction/csv_import",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Categories => "Categories",
            Self::Transactions => "Transactions",
        }
    }

    /// Page listing the imported records.
    pub fn view_path(self) -> &'static str {
        match self {
            Self::Categories => "/categories",
            Self::Transactions => "/transactions",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Categories => Self::Transactions,
            Self::Transactions => Self::Categories,
        }
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Categories => "categories",
            Self::Transactions => "transactions",
        })
    }
}

impl std::str::FromStr for ImportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "categories" | "category" => Ok(Self::Categories),
            "transactions" | "transaction" => Ok(Self::Transactions),
            other => Err(format!("unknown import target: {other}")),
        }
    }
}
