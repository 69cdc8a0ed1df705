pub mod currency;
pub mod facets;
pub mod ranker;
pub mod salary_filter;

pub use currency::{
    format_amount, parse_amount, presets, validate_range, SalaryPreset, SalaryRangeError,
    MAX_SALARY_CEILING, MIN_SALARY_FLOOR,
};
pub use facets::{apply_facets, salary_matches, Facets};
pub use ranker::{badge_for, rank, MatchBadge, DEFAULT_DISPLAY_CAP};
pub use salary_filter::{SalaryRange, SalaryRangeFilter};
