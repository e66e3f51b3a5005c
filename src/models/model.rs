use std::fmt;
use std::str::FromStr;

/// Identifier of the k-means model as used by clients.
pub const KMEANS_ID: &str = "k-means";

/// Classification model requested by a client.
///
/// Only k-means is implemented; any other name is carried through so the
/// caller can be told which model is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationModel {
    KMeans,
    Unsupported(String),
}

impl ClassificationModel {
    pub fn as_str(&self) -> &str {
        match self {
            ClassificationModel::KMeans => KMEANS_ID,
            ClassificationModel::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, ClassificationModel::KMeans)
    }
}

impl FromStr for ClassificationModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case(KMEANS_ID) || name.eq_ignore_ascii_case("kmeans") {
            Ok(ClassificationModel::KMeans)
        } else {
            Ok(ClassificationModel::Unsupported(name.to_string()))
        }
    }
}

impl From<&str> for ClassificationModel {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ClassificationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
