//! Built-in breakpoint tables.
//!
//! Temperatures are in °F, precipitation and snowfall in inches, wind in mph.

use crate::scale::Color;

const fn c(code: &str) -> Color {
    Color::hex(code)
}

pub const TEMPERATURE: &[(f64, Color)] = &[
    (0.0, c("#E4E4F7")),
    (2.0, c("#E4E1FD")),
    (4.0, c("#DBCBFF")),
    (6.0, c("#D1A9FF")),
    (8.0, c("#BF88FF")),
    (10.0, c("#A373E5")),
    (12.0, c("#8F5BBF")),
    (14.0, c("#733DA3")),
    (16.0, c("#5D2F8F")),
    (18.0, c("#420078")),
    (20.0, c("#32007E")),
    (22.0, c("#2A0099")),
    (24.0, c("#1400A0")),
    (32.0, c("#0f51d4")),
    (34.0, c("#0f75d4")),
    (36.0, c("#0f8cd4")),
    (38.0, c("#0fa6d4")),
    (40.0, c("#0fbdd4")),
    (45.0, c("#00e8e8")),
    (47.0, c("#00e8d0")),
    (48.0, c("#00e8d0")),
    (49.0, c("#00e8d0")),
    (50.0, c("#00e8d0")),
    (51.0, c("#4edec9")),
    (52.0, c("#4edec9")),
    (53.0, c("#4ddfb4")),
    (54.0, c("#4ddfb4")),
    (55.0, c("#1cb769")),
    (56.0, c("#1cb769")),
    (57.0, c("#1cb769")),
    (58.0, c("#1cb769")),
    (59.0, c("#1cb769")),
    (60.0, c("#42b51b")),
    (61.0, c("#42b51b")),
    (62.0, c("#42b51b")),
    (63.0, c("#42b51b")),
    (64.0, c("#42b51b")),
    (65.0, c("#42b51b")),
    (66.0, c("#aae71d")),
    (67.0, c("#aae71d")),
    (68.0, c("#aae71d")),
    (69.0, c("#aae71d")),
    (70.0, c("#aae71d")),
    (71.0, c("#defe01")),
    (72.0, c("#defe01")),
    (73.0, c("#fff200")),
    (74.0, c("#fff200")),
    (75.0, c("#ffdb0f")),
    (76.0, c("#ffdb0f")),
    (77.0, c("#ffdb0f")),
    (78.0, c("#ffb10f")),
    (79.0, c("#ffb10f")),
    (80.0, c("#ff990f")),
    (81.0, c("#ff990f")),
    (82.0, c("#ff810f")),
    (83.0, c("#ff810f")),
    (84.0, c("#ff450f")),
    (85.0, c("#ff450f")),
    (86.0, c("#ed1c24")),
    (87.0, c("#ed1c24")),
    (88.0, c("#ed1c24")),
    (89.0, c("#ed1c24")),
    (90.0, c("#ed1c24")),
    (91.0, c("#ed1c24")),
    (92.0, c("#ed1c24")),
    (93.0, c("#ed1c24")),
    (94.0, c("#ed1c24")),
    (95.0, c("#ed1c24")),
    (96.0, c("#db111c")),
    (97.0, c("#db111c")),
    (98.0, c("#db111c")),
    (99.0, c("#db111c")),
    (100.0, c("#cf0e3f")),
    (101.0, c("#cf0e3f")),
    (102.0, c("#c10d63")),
    (103.0, c("#c10d63")),
    (104.0, c("#f578b4")),
    (105.0, c("#f02686")),
    (106.0, c("#f02686")),
    (107.0, c("#f34e9c")),
    (108.0, c("#f34e9c")),
    (109.0, c("#f578b4")),
    (110.0, c("#f578b4")),
    (111.0, c("#f578b4")),
    (112.0, c("#f578b4")),
    (113.0, c("#fcabfa")),
    (114.0, c("#fcabfa")),
    (115.0, c("#fcabfa")),
    (116.0, c("#fcabfa")),
    (117.0, c("#cd00f9")),
    (118.0, c("#cd00f9")),
    (119.0, c("#cd00f9")),
    (120.0, c("#cd00f9")),
    (121.0, c("#cd00f9")),
];

pub const TEMPERATURE_DIFFERENCE: &[(f64, Color)] = &[
    (-30.0, c("#08306b")),
    (-20.0, c("#08519c")),
    (-15.0, c("#2171b5")),
    (-10.0, c("#4292c6")),
    (-5.0, c("#6baed6")),
    (-3.0, c("#9ecae1")),
    (-1.0, c("#c6dbef")),
    (0.0, c("#ffffff")),
    (1.0, c("#fee0d2")),
    (3.0, c("#fcbba1")),
    (5.0, c("#fc9272")),
    (10.0, c("#fb6a4a")),
    (15.0, c("#ef3b2c")),
    (20.0, c("#cb181d")),
    (30.0, c("#99000d")),
];

// Zero maps to the floor (white), so dry days stay blank.
pub const PRECIPITATION: &[(f64, Color)] = &[
    (0.01, c("#e5f5e0")),
    (0.05, c("#c7e9c0")),
    (0.10, c("#a1d99b")),
    (0.25, c("#74c476")),
    (0.50, c("#41ab5d")),
    (0.75, c("#238b45")),
    (1.00, c("#006d2c")),
    (1.50, c("#00441b")),
    (2.00, c("#08306b")),
    (3.00, c("#54278f")),
    (4.00, c("#3f007d")),
];

pub const PRECIPITATION_DIFFERENCE: &[(f64, Color)] = &[
    (-2.0, c("#8c510a")),
    (-1.0, c("#bf812d")),
    (-0.5, c("#dfc27d")),
    (-0.25, c("#f6e8c3")),
    (0.0, c("#ffffff")),
    (0.25, c("#c7eae5")),
    (0.5, c("#80cdc1")),
    (1.0, c("#35978f")),
    (2.0, c("#01665e")),
];

pub const SNOWFALL: &[(f64, Color)] = &[
    (0.1, c("#deebf7")),
    (0.5, c("#c6dbef")),
    (1.0, c("#9ecae1")),
    (2.0, c("#6baed6")),
    (3.0, c("#4292c6")),
    (4.0, c("#2171b5")),
    (6.0, c("#08519c")),
    (8.0, c("#08306b")),
    (12.0, c("#3f007d")),
    (18.0, c("#7a0177")),
];

pub const SNOWFALL_DIFFERENCE: &[(f64, Color)] = &[
    (-12.0, c("#7f3b08")),
    (-6.0, c("#b35806")),
    (-3.0, c("#e08214")),
    (-1.0, c("#fdb863")),
    (0.0, c("#ffffff")),
    (1.0, c("#b2abd2")),
    (3.0, c("#8073ac")),
    (6.0, c("#542788")),
    (12.0, c("#2d004b")),
];

pub const WIND: &[(f64, Color)] = &[
    (0.0, c("#f7fcfd")),
    (3.0, c("#e0ecf4")),
    (6.0, c("#bfd3e6")),
    (9.0, c("#9ebcda")),
    (12.0, c("#8c96c6")),
    (15.0, c("#8c6bb1")),
    (20.0, c("#88419d")),
    (25.0, c("#810f7c")),
    (30.0, c("#4d004b")),
    (40.0, c("#2d0030")),
];

pub const WIND_DIFFERENCE: &[(f64, Color)] = &[
    (-15.0, c("#276419")),
    (-10.0, c("#4d9221")),
    (-5.0, c("#7fbc41")),
    (-2.0, c("#b8e186")),
    (0.0, c("#ffffff")),
    (2.0, c("#f1b6da")),
    (5.0, c("#de77ae")),
    (10.0, c("#c51b7d")),
    (15.0, c("#8e0152")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::NO_DATA;

    const ALL: &[&[(f64, Color)]] = &[
        TEMPERATURE,
        TEMPERATURE_DIFFERENCE,
        PRECIPITATION,
        PRECIPITATION_DIFFERENCE,
        SNOWFALL,
        SNOWFALL_DIFFERENCE,
        WIND,
        WIND_DIFFERENCE,
    ];

    #[test]
    fn test_tables_strictly_increasing() {
        for table in ALL {
            assert!(!table.is_empty());
            for pair in table.windows(2) {
                assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
            }
        }
    }

    #[test]
    fn test_no_table_uses_no_data_color() {
        for table in ALL {
            assert!(table.iter().all(|(_, color)| *color != NO_DATA));
        }
    }
}
