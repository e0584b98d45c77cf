// tierback is a tiered backup rotation tool
// Copyright (C) 2025  Javier Lancha Vázquez <javier.lancha@gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Column alignment.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Alignment {
    Left,
    Right,
}

/// Length of a string as shown on a terminal, ignoring ANSI escape codes.
fn visible_string_len(s: &str) -> usize {
    let mut len = 0;
    let mut in_ansi_escape = false;

    for c in s.chars() {
        if in_ansi_escape {
            if c == 'm' {
                in_ansi_escape = false;
            }
        } else if c == '\x1b' {
            in_ansi_escape = true;
        } else {
            len += 1;
        }
    }
    len
}

/// A plain text table with a header row.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    alignments: Vec<Alignment>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let alignments = vec![Alignment::Left; headers.len()];
        Self {
            headers,
            rows: Vec::new(),
            alignments,
        }
    }

    pub fn set_column_alignment(&mut self, column_index: usize, alignment: Alignment) {
        if column_index >= self.alignments.len() {
            self.alignments.resize(column_index + 1, Alignment::Left);
        }
        self.alignments[column_index] = alignment;
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let num_columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; num_columns];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visible_string_len(cell));
            }
        }
        widths
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let fill = " ".repeat(widths[i] - visible_string_len(cell));
                match self.alignments.get(i).copied().unwrap_or(Alignment::Left) {
                    Alignment::Left => format!("{cell}{fill}"),
                    Alignment::Right => format!("{fill}{cell}"),
                }
            })
            .collect();
        format!("{}\n", cells.join("  ").trim_end())
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let line_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let line = format!("{}\n", "-".repeat(line_width));

        let mut output = self.render_row(&self.headers, &widths);
        output.push_str(&line);
        for row in &self.rows {
            output.push_str(&self.render_row(row, &widths));
        }
        output
    }
}
