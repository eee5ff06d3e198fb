//! Plain-text tables with box-drawing fences.

const COLUMN_FENCE: char = '│';
const ROW_FENCE: char = '─';
const CORNER_FENCE: char = '┼';

/// A table of left-aligned text cells.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render empty and extra cells are ignored.
    pub fn add_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();

        let mut separator = String::from(CORNER_FENCE);
        for width in &widths {
            separator.extend(std::iter::repeat(ROW_FENCE).take(width + 2));
            separator.push(CORNER_FENCE);
        }

        let line = |cells: &[String]| {
            let mut out = String::from(COLUMN_FENCE);
            for (cell, width) in cells.iter().zip(&widths) {
                let pad = width - cell.chars().count();
                out.push(' ');
                out.push_str(cell);
                out.extend(std::iter::repeat(' ').take(pad + 1));
                out.push(COLUMN_FENCE);
            }
            out
        };

        let mut lines = vec![separator.clone(), line(&self.headers), separator.clone()];
        lines.extend(self.rows.iter().map(|row| line(row)));
        lines.push(separator);
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_to_widest_cell() {
        let mut table = Table::new(&["Framework", "Duplications"]);
        table.add_row(["Foo.xcframework", "2"]);
        table.add_row(["A", "10"]);

        let expected = "\
┼─────────────────┼──────────────┼
│ Framework       │ Duplications │
┼─────────────────┼──────────────┼
│ Foo.xcframework │ 2            │
│ A               │ 10           │
┼─────────────────┼──────────────┼";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_render_without_rows() {
        let table = Table::new(&["Name"]);
        assert_eq!(table.render(), "┼──────┼\n│ Name │\n┼──────┼\n┼──────┼");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(["x"]);
        assert!(table.render().contains("│ x │   │"));
    }
}
