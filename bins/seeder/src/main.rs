//! Database seeder for Roomify development and testing.
//!
//! Seeds one account per role and a handful of properties, then prints a
//! development access token for each account. There is no login endpoint;
//! these tokens are how a local client talks to the API.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use roomify_core::{PropertyStatus, Role};
use roomify_db::{CreatePropertyInput, PropertyRepository, UserRepository, connect};
use roomify_shared::{AppConfig, JwtService, types::UserId};

struct SeedUser {
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    role: Role,
}

const USERS: [SeedUser; 3] = [
    SeedUser {
        email: "admin@roomify.dev",
        first_name: "Ada",
        last_name: "Admin",
        role: Role::Admin,
    },
    SeedUser {
        email: "host@roomify.dev",
        first_name: "Hana",
        last_name: "Host",
        role: Role::Host,
    },
    SeedUser {
        email: "guest@roomify.dev",
        first_name: "Gus",
        last_name: "Guest",
        role: Role::Guest,
    },
];

/// (title, price per night in cents, max guests, status)
const PROPERTIES: [(&str, i64, u32, PropertyStatus); 3] = [
    ("Harbour Loft", 12_000, 2, PropertyStatus::Active),
    ("Pine Cabin", 8_550, 4, PropertyStatus::Active),
    ("Closed Cottage", 6_000, 3, PropertyStatus::Inactive),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = connect(&config.database.url).await?;

    let jwt = JwtService::new(config.jwt.jwt_config()?);

    println!("Seeding users...");
    let mut host_id = None;
    for user in &USERS {
        let id = seed_user(&db, user).await?;
        if user.role == Role::Host {
            host_id = Some(id);
        }
        let token = jwt.generate_access_token(id.into_inner(), user.role.as_str())?;
        println!("  {} ({}): {token}", user.email, user.role.as_str());
    }

    if let Some(owner_id) = host_id {
        println!("Seeding properties...");
        seed_properties(&db, owner_id).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

/// Creates the user unless the email is already taken, returning its id.
async fn seed_user(db: &DatabaseConnection, user: &SeedUser) -> anyhow::Result<UserId> {
    let repo = UserRepository::new(db.clone());

    if let Some(existing) = repo.find_by_email(user.email).await? {
        println!("  {} already exists, skipping...", user.email);
        return Ok(UserId::from(existing.id));
    }

    let created = repo
        .create(user.email, user.first_name, user.last_name, user.role)
        .await?;
    Ok(UserId::from(created.id))
}

/// Seeds the sample listings for the host. Reruns add duplicates, which is
/// harmless for local data.
async fn seed_properties(db: &DatabaseConnection, owner_id: UserId) -> anyhow::Result<()> {
    let repo = PropertyRepository::new(db.clone());

    for (title, cents, max_guests, status) in PROPERTIES {
        let property = repo
            .create(CreatePropertyInput {
                owner_id,
                title: title.to_string(),
                description: None,
                price_per_night: Decimal::new(cents, 2),
                max_guests,
                status,
            })
            .await?;
        println!("  Created {} ({})", property.title, property.id);
    }

    Ok(())
}
