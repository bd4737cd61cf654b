//! Seed the database with demo data.
//!
//! Inserts a small, stable set of suppliers, products, headquarters and
//! branches with fixed ids. Re-running is safe; existing rows are left alone
//! and the id sequences are bumped past the seeded values.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: OCTOCAT_DATABASE_URL")]
    MissingDatabaseUrl,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed demo data.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url().ok_or(SeedError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Seeding demo data...");
    seed_suppliers(&pool).await?;
    seed_products(&pool).await?;
    seed_org(&pool).await?;
    fix_sequences(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_suppliers(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO suppliers (supplier_id, name, description, contact_person, email, phone)
        VALUES
            (1, 'Acme Components', 'Robotic arms and actuators', 'Mona Lisa',
             'sales@acme-components.example', '+1-555-0100'),
            (2, 'Hubber Parts Co', 'Sensors and controllers', 'Hubot',
             'orders@hubberparts.example', '+1-555-0101')
        ON CONFLICT DO NOTHING
        ",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO products
            (product_id, supplier_id, name, description, price, sku, unit, img_name, discount)
        VALUES
            (1, 1, 'Robo-Arm MK4', 'Six-axis robotic arm', 1299.00, 'ARM-MK4', 'unit',
             'robo-arm.png', NULL),
            (2, 1, 'Gripper Claw', 'Pneumatic gripper attachment', 249.50, 'GRP-01', 'unit',
             'gripper.png', 0.10),
            (3, 2, 'Proximity Sensor', 'Infrared proximity sensor', 39.99, 'SNS-IR', 'unit',
             'sensor.png', NULL),
            (4, 2, 'Motion Controller', 'Four-channel motion controller', 189.00, 'CTL-4CH',
             'unit', 'controller.png', 0.05)
        ON CONFLICT DO NOTHING
        ",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_org(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO headquarters
            (headquarters_id, name, description, address, contact_person, email, phone)
        VALUES
            (1, 'OctoCAT Supply HQ', 'Main headquarters', '88 Colony Square, Octoville',
             'Octocat', 'hq@octocat-supply.example', '+1-555-0199')
        ON CONFLICT DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO branches
            (branch_id, headquarters_id, name, description, address, contact_person, email, phone)
        VALUES
            (1, 1, 'North Branch', 'Northern distribution center', '12 Fork Road, Octoville',
             'Sam Spindle', 'north@octocat-supply.example', '+1-555-0190'),
            (2, 1, 'South Branch', 'Southern distribution center', '7 Merge Lane, Octoville',
             'Riley Rebase', 'south@octocat-supply.example', '+1-555-0191')
        ON CONFLICT DO NOTHING
        ",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Bump serial sequences past the fixed seed ids.
async fn fix_sequences(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (table, column) in [
        ("suppliers", "supplier_id"),
        ("products", "product_id"),
        ("headquarters", "headquarters_id"),
        ("branches", "branch_id"),
    ] {
        let query = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
             (SELECT COALESCE(MAX({column}), 1) FROM {table}))"
        );
        sqlx::query(&query).execute(pool).await?;
    }
    Ok(())
}
