use serde::{Deserialize, Serialize};

/// How a static signature matched. Closed set; unknown values are rejected
/// at every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Text,
    Oid,
    Parameter,
}

impl DetectionMethod {
    /// All variants for iteration.
    pub const ALL: [DetectionMethod; 3] = [Self::Text, Self::Oid, Self::Parameter];

    /// String name for this method (matching the serde rename).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Oid => "oid",
            Self::Parameter => "parameter",
        }
    }

    /// Parse from string. Returns None for anything outside the closed set.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "oid" => Some(Self::Oid),
            "parameter" => Some(Self::Parameter),
            _ => None,
        }
    }
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a static finding. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// All variants for iteration.
    pub const ALL: [Severity; 3] = [Self::High, Self::Medium, Self::Low];

    /// String name for this severity (matching the serde rename).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse from string. Returns None for anything outside the closed set.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static signature finding, keyed by its File<->Scan association.
/// Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticDetection {
    pub id: i64,
    pub file_id: i64,
    pub scan_id: i64,
    /// Byte offset of the match within the file, when known.
    pub byte_offset: Option<i64>,
    pub algorithm: String,
    pub matched_pattern: String,
    pub method: DetectionMethod,
    pub severity: Severity,
}

/// A static finding as submitted by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStaticDetection {
    pub file_id: i64,
    pub scan_id: i64,
    pub byte_offset: Option<i64>,
    pub algorithm: String,
    pub matched_pattern: String,
    pub method: DetectionMethod,
    pub severity: Severity,
}

/// A dynamic behavioral finding, keyed by its File<->Scan association.
/// All observation fields are independently nullable. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DynamicDetection {
    pub id: i64,
    pub file_id: i64,
    pub scan_id: i64,
    pub parameter: Option<String>,
    pub algorithm: Option<String>,
    pub api: Option<String>,
    pub key_length: Option<i64>,
}

/// A dynamic finding as submitted by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDynamicDetection {
    pub file_id: i64,
    pub scan_id: i64,
    pub parameter: Option<String>,
    pub algorithm: Option<String>,
    pub api: Option<String>,
    pub key_length: Option<i64>,
}
