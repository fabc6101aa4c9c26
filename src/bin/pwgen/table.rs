use std::borrow::Cow;
use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

pub(crate) fn display_table<Row: TableDisplay>(
    rows: &[Row],
    mut output: impl Write,
) -> io::Result<()> {
    let column_count = Row::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| Row::column_name(column_index).width())
        .collect::<Vec<_>>();

    let cells = rows
        .iter()
        .map(|row| {
            (0..column_count)
                .map(|column_index| row.item(column_index))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    for row in &cells {
        for (column_index, cell) in row.iter().enumerate() {
            column_widths[column_index] =
                std::cmp::max(cell.width(), column_widths[column_index]);
        }
    }

    output_row(&mut output, column_count, |column_index| {
        Padded(Row::column_name(column_index), column_widths[column_index])
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in &cells {
        output_row(&mut output, column_count, |column_index| {
            Padded(&row[column_index], column_widths[column_index])
        })?;
    }

    Ok(())
}

pub(crate) trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> Cow<'_, str>;
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index != 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

/// Left-aligns a cell, padding by display width rather than by `char` count.
struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}", self.0)?;
        for _ in 0..padding {
            write!(f, " ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, String);

    impl TableDisplay for Pair {
        fn columns() -> usize {
            2
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "Name",
                1 => "Value",
                _ => panic!(),
            }
        }

        fn item(&self, column_index: usize) -> Cow<'_, str> {
            match column_index {
                0 => Cow::from(self.0),
                1 => Cow::from(self.1.as_str()),
                _ => panic!(),
            }
        }
    }

    #[test]
    fn columns_are_padded_to_the_widest_cell() {
        let rows = [Pair("a", "1".to_owned()), Pair("longer", "22".to_owned())];
        let mut out = Vec::new();
        display_table(&rows, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name    Value",
                "──────  ─────",
                "a       1    ",
                "longer  22   ",
            ]
        );
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let rows = [Pair("漢字", "x".to_owned()), Pair("abcde", "y".to_owned())];
        let mut out = Vec::new();
        display_table(&rows, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().nth(2), Some("漢字   x    "));
    }
}
