//! Text-grid parsing for terrain and scenery layers.
//!
//! Each line is a row (`y`) and each character a column (`x`). Symbols
//! outside the alphabet are dropped without shifting the coordinates of
//! the characters that follow them.

use super::tiles::{SceneryKind, SceneryTile, TerrainKind, TerrainTile};

pub fn parse_map_data(text: &str) -> Vec<TerrainTile> {
    rows(text)
        .flat_map(|(y, line)| {
            line.chars().enumerate().filter_map(move |(x, symbol)| {
                let kind = TerrainKind::from_symbol(symbol);
                kind.is_valid()
                    .then_some(TerrainTile::new(kind, x as i32, y))
            })
        })
        .collect()
}

pub fn parse_scenery_data(text: &str) -> Vec<SceneryTile> {
    rows(text)
        .flat_map(|(y, line)| {
            line.chars().enumerate().filter_map(move |(x, symbol)| {
                let kind = SceneryKind::from_symbol(symbol);
                kind.is_valid().then_some(SceneryTile {
                    kind,
                    x: x as i32,
                    y,
                })
            })
        })
        .collect()
}

// `lines` strips a trailing `\r`, so CRLF files parse like LF files.
fn rows(text: &str) -> impl Iterator<Item = (i32, &str)> {
    text.lines()
        .enumerate()
        .map(|(y, line)| (y as i32, line.trim_end_matches('\r')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tiles() {
        assert!(parse_map_data("").is_empty());
        assert!(parse_scenery_data("").is_empty());
    }

    #[test]
    fn parses_every_cell_of_a_valid_grid() {
        let tiles = parse_map_data("gpl\nwgp");
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], TerrainTile::new(TerrainKind::Grass, 0, 0));
        assert_eq!(tiles[2], TerrainTile::new(TerrainKind::HousingPlot, 2, 0));
        assert_eq!(tiles[3], TerrainTile::new(TerrainKind::Water, 0, 1));
        assert_eq!(tiles[5], TerrainTile::new(TerrainKind::Path, 2, 1));
    }

    #[test]
    fn invalid_symbols_are_dropped_without_shifting_columns() {
        let tiles = parse_map_data("gxp");
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].x, 2);
        assert_eq!(tiles[1].kind, TerrainKind::Path);
    }

    #[test]
    fn crlf_and_lf_produce_identical_grids() {
        assert_eq!(parse_map_data("gp\r\npg\r\n"), parse_map_data("gp\npg\n"));
    }

    #[test]
    fn scenery_alphabet() {
        let tiles = parse_scenery_data(".t\ns?");
        let kinds: Vec<_> = tiles.iter().map(|t| (t.kind, t.x, t.y)).collect();
        assert_eq!(
            kinds,
            vec![
                (SceneryKind::Empty, 0, 0),
                (SceneryKind::Tree, 1, 0),
                (SceneryKind::Rock, 0, 1),
            ]
        );
    }
}
