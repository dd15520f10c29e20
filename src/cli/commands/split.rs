use crate::cli::parse_date_arg;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::split::SplitLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Split { employee, date } = cmd {
        let date = parse_date_arg(date)?;
        let mut pool = DbPool::new(&cfg.database)?;
        SplitLogic::apply(&mut pool, employee, date)?;
    }
    Ok(())
}
