//! Seed the database with a small demo data set.
//!
//! Inserts two products, one customer, and one order through the same
//! repositories the API uses, so the seeded rows exercise the full
//! aggregate path (transactional order + items insert).

use secrecy::SecretString;
use tracing::info;

use orderdesk_api::db::{self, CustomerRepository, OrderRepository, ProductRepository};
use orderdesk_core::{Cents, Email};

/// Insert the demo data set.
///
/// # Errors
///
/// Returns an error if environment variables are missing or a database
/// operation fails. Seeding is not idempotent: re-running against a database
/// that already has the demo customer fails on the unique email.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORDERDESK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ORDERDESK_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    let notebook = products.create("Notebook", Cents::new(250_000)).await?;
    let mouse = products.create("Mouse", Cents::new(5_000)).await?;
    info!(notebook = %notebook.id, mouse = %mouse.id, "Seeded products");

    let email = Email::parse("joao@x.com")?;
    let customer = CustomerRepository::new(&pool)
        .create("João", &email, None, None)
        .await?;
    info!(customer = %customer.id, "Seeded customer");

    let order = OrderRepository::new(&pool)
        .create(&customer, &[(notebook, 2), (mouse, 1)])
        .await?;
    info!(order = %order.id, total = order.total_amount(), "Seeded order");

    Ok(())
}
