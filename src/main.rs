use dotenvy::dotenv;
use loan_ledger::{
    config::{database, settings},
    core::{admin, balance, friend, report},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load ledger settings
    let config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load ledger settings: {}", e))?;
    info!(
        "Using {:?} for unknown transaction types",
        config.unknown_transaction_types
    );

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Report every admin's ledger
    for admin in admin::get_all_admins(&db).await? {
        let balances =
            balance::load_admin_balances(&db, admin.id, config.unknown_transaction_types).await?;
        let summary = balance::summarize(&balances)?;

        info!(
            "{} <{}>: {}",
            admin.username,
            admin.email,
            report::format_ledger_status(&summary, &admin.currency)
        );

        for friend in friend::get_active_friends(&db, admin.id).await? {
            let statement = report::generate_friend_statement(
                &db,
                friend.id,
                Some(config.recent_transaction_limit),
                config.unknown_transaction_types,
            )
            .await?;

            info!(
                "  {} {}",
                report::format_balance_line(
                    &statement.friend.name,
                    &statement.balance,
                    &statement.currency
                ),
                report::format_progress_bar(statement.progress_percent, None)
            );
            for transaction in &statement.recent_transactions {
                info!(
                    "    {}",
                    report::format_transaction_summary(transaction, &statement.currency)
                );
            }
        }
    }

    Ok(())
}
