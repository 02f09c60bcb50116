//! CSV export of scenario grids
//!
//! Semicolon-delimited, values written with a `.` decimal point and three
//! decimals. Spreadsheets in comma-decimal locales may need the column
//! format set by hand on import.

use crate::error::CliResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use synergia_core::ScenarioGrid;
use tracing::info;

pub const CSV_DELIMITER: char = ';';

/// Write `grid` as CSV: a `Dice Count;d4;d6...` header, then one `Nd` row per dice count
pub fn write_scenario_csv<W: Write>(grid: &ScenarioGrid, writer: &mut W) -> std::io::Result<()> {
    let mut header = String::from("Dice Count");
    for sides in &grid.die_sides {
        header.push(CSV_DELIMITER);
        header.push_str(&format!("d{sides}"));
    }
    writeln!(writer, "{header}")?;

    for (dice_count, row) in grid.iter_rows() {
        let mut line = format!("{dice_count}d");
        for average in row {
            line.push(CSV_DELIMITER);
            line.push_str(&format!("{average:.3}"));
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Render `grid` as a CSV string
pub fn scenario_csv(grid: &ScenarioGrid) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_scenario_csv(grid, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write `grid` to a CSV file at `path`
pub fn export_scenario_csv(grid: &ScenarioGrid, path: &Path) -> CliResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_scenario_csv(grid, &mut writer)?;
    writer.flush()?;
    info!("Scenario grid written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use synergia_core::{sweep_scenario_seeded, ScenarioProfile};

    #[test]
    fn test_csv_layout() {
        let grid = sweep_scenario_seeded(&ScenarioProfile::default(), 3, &[4, 6], 200, 1).unwrap();
        let csv = scenario_csv(&grid);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Dice Count;d4;d6");
        assert!(lines[1].starts_with("1d;"));
        assert!(lines[3].starts_with("3d;"));

        let cells: Vec<&str> = lines[2].split(';').collect();
        assert_eq!(cells.len(), 3);
        for cell in &cells[1..] {
            let decimals = cell.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 3);
        }
    }

    #[test]
    fn test_csv_values_match_grid() {
        let grid = sweep_scenario_seeded(&ScenarioProfile::default(), 1, &[8], 300, 4).unwrap();
        let csv = scenario_csv(&grid);
        let expected = format!("1d;{:.3}", grid.get(1, 8).unwrap());
        assert_eq!(csv.lines().nth(1).unwrap(), expected);
    }
}
