//! フィルタ問い合わせの解析
//!
//! サイズ指定は `[比較演算子?][数値][単位?]`（例: `>5MB`, `<2kb`, `1.5GB`）

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// フィルタの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Name,
    Type,
    Size,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Name => "name",
            FilterMode::Type => "type",
            FilterMode::Size => "size",
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "name" => Ok(FilterMode::Name),
            "type" => Ok(FilterMode::Type),
            "size" => Ok(FilterMode::Size),
            other => Err(format!("unknown filter mode: {}", other)),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// フィルタ問い合わせ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub raw_text: String,
    pub mode: FilterMode,
}

impl FilterQuery {
    pub fn new(raw_text: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            raw_text: raw_text.into(),
            mode,
        }
    }

    pub fn name(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, FilterMode::Name)
    }

    pub fn file_type(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, FilterMode::Type)
    }

    pub fn size(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, FilterMode::Size)
    }

    /// 空のフィルタは「フィルタなし」と同じ扱い
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// フォルダを指すキーワード（"folder" / "directory"）か
    ///
    /// 前後の空白は取り除かずに比較する
    pub fn names_folders(&self) -> bool {
        self.raw_text.eq_ignore_ascii_case("folder") || self.raw_text.eq_ignore_ascii_case("directory")
    }
}

/// サイズ比較演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// ±5% の近似一致
    Approx,
    Less,
    Greater,
}

/// サイズ単位（1024のべき乗）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    B,
    KB,
    MB,
    GB,
    TB,
}

impl SizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            SizeUnit::B => 1,
            SizeUnit::KB => 1024,
            SizeUnit::MB => 1024 * 1024,
            SizeUnit::GB => 1024 * 1024 * 1024,
            SizeUnit::TB => 1024 * 1024 * 1024 * 1024,
        }
    }

    fn from_suffix(suffix: &str) -> Self {
        match suffix.to_ascii_uppercase().as_str() {
            "KB" => SizeUnit::KB,
            "MB" => SizeUnit::MB,
            "GB" => SizeUnit::GB,
            "TB" => SizeUnit::TB,
            _ => SizeUnit::B,
        }
    }
}

/// 解析済みのサイズ指定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    pub comparator: Comparator,
    pub magnitude: f64,
    pub unit: SizeUnit,
}

/// 近似一致の許容幅
pub const APPROX_TOLERANCE: f64 = 0.05;

impl SizeSpec {
    /// サイズ指定を解析（数値が読めなければ None）
    pub fn parse(text: &str) -> Option<Self> {
        let captures = size_pattern().captures(text.trim())?;

        let comparator = match captures.get(1).map(|m| m.as_str()) {
            Some(">") => Comparator::Greater,
            Some("<") => Comparator::Less,
            _ => Comparator::Approx,
        };

        let magnitude: f64 = captures.get(2)?.as_str().trim().parse().ok()?;
        if !magnitude.is_finite() {
            return None;
        }

        let unit = captures
            .get(3)
            .map(|m| SizeUnit::from_suffix(m.as_str()))
            .unwrap_or(SizeUnit::B);

        Some(Self {
            comparator,
            magnitude,
            unit,
        })
    }

    /// 比較対象のバイト数（小数部は切り捨て）
    pub fn target_bytes(&self) -> u64 {
        (self.magnitude * self.unit.multiplier() as f64) as u64
    }

    /// ファイルサイズが条件を満たすか
    pub fn matches(&self, size: u64) -> bool {
        let target = self.target_bytes();
        match self.comparator {
            Comparator::Greater => size > target,
            Comparator::Less => size < target,
            Comparator::Approx => {
                // 目標 0 バイトの比率は定義できないので一致しない
                let ratio = size as f64 / target as f64;
                (1.0 - APPROX_TOLERANCE..=1.0 + APPROX_TOLERANCE).contains(&ratio)
            }
        }
    }
}

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^([<>=])?\s*(.*?)\s*(KB|MB|GB|TB|B)?$").expect("size filter pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let spec = SizeSpec::parse("100").unwrap();
        assert_eq!(spec.comparator, Comparator::Approx);
        assert_eq!(spec.unit, SizeUnit::B);
        assert_eq!(spec.target_bytes(), 100);
    }

    #[test]
    fn test_parse_comparator_and_unit() {
        let spec = SizeSpec::parse(">5MB").unwrap();
        assert_eq!(spec.comparator, Comparator::Greater);
        assert_eq!(spec.target_bytes(), 5 * 1024 * 1024);

        let spec = SizeSpec::parse(" < 2 kb ").unwrap();
        assert_eq!(spec.comparator, Comparator::Less);
        assert_eq!(spec.unit, SizeUnit::KB);
        assert_eq!(spec.target_bytes(), 2048);

        let spec = SizeSpec::parse("=1.5gb").unwrap();
        assert_eq!(spec.target_bytes(), 1024 * 1024 * 1024 * 3 / 2);

        let spec = SizeSpec::parse("1TB").unwrap();
        assert_eq!(spec.target_bytes(), 1024u64.pow(4));

        let spec = SizeSpec::parse("512B").unwrap();
        assert_eq!(spec.target_bytes(), 512);
    }

    #[test]
    fn test_parse_failures() {
        assert!(SizeSpec::parse("").is_none());
        assert!(SizeSpec::parse("big").is_none());
        assert!(SizeSpec::parse(">MB").is_none());
        assert!(SizeSpec::parse("inf").is_none());
    }

    #[test]
    fn test_approx_band() {
        let spec = SizeSpec::parse("=1MB").unwrap();
        assert!(spec.matches(1_048_000));
        assert!(spec.matches(1_048_576));
        assert!(!spec.matches(900_000));
        assert!(!spec.matches(1_200_000));
    }

    #[test]
    fn test_zero_target_approx() {
        let spec = SizeSpec::parse("0").unwrap();
        assert!(!spec.matches(0));
        assert!(!spec.matches(10));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Size".parse::<FilterMode>().unwrap(), FilterMode::Size);
        assert!("colour".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_folder_keyword() {
        assert!(FilterQuery::file_type("Folder").names_folders());
        assert!(FilterQuery::size("DIRECTORY").names_folders());
        assert!(!FilterQuery::file_type("folders").names_folders());
        assert!(!FilterQuery::file_type(" folder").names_folders());
    }
}
