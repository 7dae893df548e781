//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default source table (damage export converted to CSV)
pub const DEFAULT_INPUT_FILE: &str = "Dano.csv";

/// Default report destination
pub const DEFAULT_REPORT_FILE: &str = "artifacts/report.json";

/// Default comment log location
pub const DEFAULT_COMMENTS_FILE: &str = "comments.csv";

// The damage export starts with a title block before the real header row
pub const METADATA_ROWS: usize = 4;

/// Normalized name of the event date column
pub const DATE_COLUMN: &str = "registro(data)";

// Accepted date layouts, tried in order. Datetime layouts keep only the date.
pub const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];
pub const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

// People-affected columns (normalized names)
pub const DEATHS: &str = "dh_mortos";
pub const INJURED: &str = "dh_feridos";
pub const ILL: &str = "dh_enfermos";
pub const HOMELESS: &str = "dh_desabrigados";
pub const DISPLACED: &str = "dh_desalojados";
pub const MISSING: &str = "dh_desaparecidos";
pub const OTHER_AFFECTED: &str = "dh_outros_afetados";

pub const PEOPLE_AFFECTED_COLUMNS: [&str; 7] = [
    DEATHS,
    INJURED,
    ILL,
    HOMELESS,
    DISPLACED,
    MISSING,
    OTHER_AFFECTED,
];

/// Any normalized column containing this fragment holds a monetary loss
pub const DESTRUCTION_VALUE_FRAGMENT: &str = "valor";

// Derived column
pub const TOTAL_DESTRUCTION_VALUE: &str = "total_destruction_value";

/// Ranking keys, all descending, in priority order
pub const RANKING_KEYS: [&str; 4] = [DEATHS, INJURED, DISPLACED, TOTAL_DESTRUCTION_VALUE];

/// Size of the worst-events short-list
pub const DEFAULT_TOP_N: usize = 5;
pub const MAX_TOP_N: usize = 100;

/// Header of the comment log
pub const COMMENT_COLUMNS: [&str; 3] = ["date", "cause", "comment"];
