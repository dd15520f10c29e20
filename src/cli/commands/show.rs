use crate::cli::parse_date_arg;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::show::ShowLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        employee,
        date,
        offset,
        period,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        match date {
            Some(d) => {
                let date = parse_date_arg(d)?;
                ShowLogic::at(&mut pool, cfg, employee, date, *offset)?;
            }
            None => {
                ShowLogic::list(&mut pool, cfg, employee, period.as_deref())?;
            }
        }
    }
    Ok(())
}
