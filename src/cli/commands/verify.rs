use crate::cli::parse_date_arg;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::verify::VerifyLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Verify {
        employee,
        date,
        through,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let through = through.unwrap_or(cfg.default_verify_days);

        let mut pool = DbPool::new(&cfg.database)?;
        VerifyLogic::apply(&mut pool, employee, date, through)?;
    }
    Ok(())
}
