use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{find_type_by_name, insert_type, list_types};
use crate::errors::{AppError, AppResult};
use crate::models::utilization_type::UtilizationType;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub struct TypeLogic;

impl TypeLogic {
    pub fn add(pool: &mut DbPool, name: &str) -> AppResult<UtilizationType> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidUtilizationType(
                "type name cannot be empty".to_string(),
            ));
        }
        if find_type_by_name(&pool.conn, name)?.is_some() {
            return Err(AppError::InvalidUtilizationType(format!(
                "'{}' already exists",
                name
            )));
        }

        let id = insert_type(&pool.conn, name)?;
        ttlog_or_warn(&pool.conn, "type", name, &format!("Added utilization type {id}"));
        success(format!("Added utilization type '{}' (id {})", name, id));

        Ok(UtilizationType::new(id, name))
    }

    pub fn list(pool: &mut DbPool, cfg: &Config) -> AppResult<Vec<UtilizationType>> {
        let types = list_types(&pool.conn)?;
        if types.is_empty() {
            info("No utilization types defined yet. Add one with `rstaffer type --add NAME`.");
            return Ok(types);
        }

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(vec![Column::new("ID"), Column::new("NAME")], sep);
        for t in &types {
            table.add_row(vec![t.id.to_string(), t.name.clone()]);
        }
        print!("{}", table.render());

        Ok(types)
    }
}
