use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::types::TypeLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Type { add, list } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            TypeLogic::add(&mut pool, name)?;
        }

        if *list {
            TypeLogic::list(&mut pool, cfg)?;
        }

        if add.is_none() && !*list {
            warning("Nothing to do: use --add NAME or --list.");
        }
    }
    Ok(())
}
