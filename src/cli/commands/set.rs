use crate::cli::parse_date_arg;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assign::AssignLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Set {
        employee,
        date,
        utilization_type,
        verified,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        // without the flag an in-place update keeps the current review state
        let verified = verified.then_some(true);

        let mut pool = DbPool::new(&cfg.database)?;
        AssignLogic::apply(&mut pool, employee, date, utilization_type, verified)?;
    }
    Ok(())
}
