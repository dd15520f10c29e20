use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        employee,
        range,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let rows = ExportLogic::export(
            &mut pool,
            *format,
            file,
            employee.as_deref(),
            range.as_deref(),
            *force,
        )?;

        if rows > 0 {
            ttlog_or_warn(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} utilizations exported to {}", rows, file),
            );
        }
    }
    Ok(())
}
