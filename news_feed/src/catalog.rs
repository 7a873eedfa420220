//! Static sector catalog.
//!
//! Each sector carries a representative stock list and a keyword list. Both
//! are only used as hints when asking the backend for sector news. Lookups of
//! unknown sectors return an empty entry instead of failing.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Stock and keyword hints for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorMeta {
    pub stocks: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

/// Returned for sectors that are not in the catalog.
pub const UNKNOWN_SECTOR: SectorMeta = SectorMeta {
    stocks: &[],
    keywords: &[],
};

static SECTORS: Lazy<IndexMap<&'static str, SectorMeta>> = Lazy::new(|| {
    IndexMap::from([
        (
            "Banking & Finance",
            SectorMeta {
                stocks: &["HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK", "BAJFINANCE", "HDFCLIFE"],
                keywords: &["RBI", "repo rate", "credit growth", "NPA", "NBFC", "banking", "insurance"],
            },
        ),
        (
            "IT & Tech",
            SectorMeta {
                stocks: &["TCS", "INFY", "HCLTECH", "WIPRO", "TECHM", "LTIM", "PERSISTENT"],
                keywords: &["IT", "software", "outsourcing", "deal wins", "AI", "digital", "cloud"],
            },
        ),
        (
            "Oil & Gas",
            SectorMeta {
                stocks: &["RELIANCE", "ONGC", "BPCL", "HPCL", "IOC", "GAIL", "IGL"],
                keywords: &["crude oil", "Brent", "refinery", "OMC", "GRM", "natural gas", "OPEC"],
            },
        ),
        (
            "Auto & EV",
            SectorMeta {
                stocks: &["MARUTI", "TATAMOTORS", "M&M", "BAJAJ-AUTO", "HEROMOTOCO", "EICHERMOT", "TVSMOTOR"],
                keywords: &["automobile", "EV", "electric vehicle", "two-wheeler", "SUV", "auto sales", "PLI"],
            },
        ),
        (
            "Pharma & Health",
            SectorMeta {
                stocks: &["SUNPHARMA", "DRREDDY", "CIPLA", "DIVISLAB", "AUROPHARMA", "LUPIN", "TORNTPHARM"],
                keywords: &["pharma", "drug", "FDA", "USFDA", "API", "biosimilar", "generic", "healthcare"],
            },
        ),
        (
            "Metals & Mining",
            SectorMeta {
                stocks: &["TATASTEEL", "JSWSTEEL", "HINDALCO", "VEDL", "COALINDIA", "NMDC", "SAIL"],
                keywords: &["steel", "aluminium", "copper", "iron ore", "metal", "mining", "coal", "China demand"],
            },
        ),
        (
            "FMCG & Consumer",
            SectorMeta {
                stocks: &["HINDUNILVR", "ITC", "NESTLEIND", "BRITANNIA", "DABUR", "MARICO", "COLPAL"],
                keywords: &["FMCG", "consumer", "rural demand", "volume growth", "food", "household", "staples"],
            },
        ),
        (
            "Infrastructure",
            SectorMeta {
                stocks: &["LT", "NTPC", "POWERGRID", "ADANIPORTS", "ULTRACEMCO", "SHREECEM", "DLF"],
                keywords: &["infrastructure", "capex", "cement", "power", "road", "highway", "port", "construction"],
            },
        ),
        (
            "Global Macro",
            SectorMeta {
                stocks: &["NIFTY50", "SENSEX", "USDINR", "GOLDBEES", "NIFTYBEES"],
                keywords: &["Federal Reserve", "Fed", "US economy", "China", "global", "inflation", "recession", "GDP"],
            },
        ),
        (
            "Regulatory & Policy",
            SectorMeta {
                stocks: &["BSE", "MCX", "CDSL", "CAMS", "ANGELONE"],
                keywords: &["SEBI", "RBI", "government", "policy", "budget", "GST", "regulation", "ministry"],
            },
        ),
    ])
});

/// Sector names in catalog order.
pub fn sector_names() -> Vec<&'static str> {
    SECTORS.keys().copied().collect()
}

/// Number of sectors in the catalog.
pub fn sector_count() -> usize {
    SECTORS.len()
}

pub fn is_known_sector(name: &str) -> bool {
    SECTORS.contains_key(name)
}

/// Looks up a sector, falling back to [`UNKNOWN_SECTOR`].
pub fn lookup(name: &str) -> &'static SectorMeta {
    SECTORS.get(name).unwrap_or(&UNKNOWN_SECTOR)
}
