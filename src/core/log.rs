use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::{pad_right, truncate, visible_width};
use ansi_term::Colour;

const OP_WIDTH_MAX: usize = 60;

/// Colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "set" => Colour::Green,
        "verify" => Colour::Cyan,
        "split" => Colour::Yellow,
        "type" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the audit log, oldest entry first. Returns the number of rows.
    pub fn print_log(pool: &mut DbPool) -> AppResult<usize> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: Option<String> = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target.unwrap_or_default(), message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(0);
        }

        let op_target = |op: &str, target: &str| {
            if target.is_empty() {
                op.to_string()
            } else {
                format!("{op} ({target})")
            }
        };

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| visible_width(&op_target(op, target)))
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in &entries {
            let color = color_for_operation(operation);
            let visible = truncate(&op_target(operation, target), OP_WIDTH_MAX);

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                id,
                date,
                pad_right(&colored, op_w),
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(entries.len())
    }
}
