//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use parklot::models::lot::{LotCreation, NewLot};
use parklot::models::user::{CreateUser, UserRole};
use parklot::services::{auth, lot};
use sqlx::PgPool;

const SEED_PASSWORD: &str = "Parklot123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = parklot::db::create_pool(&db_url, 5).await?;
    parklot::db::run_migrations(&pool).await?;

    println!("=== parklot seed ===");

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = 'admin@parklot.local')")
            .fetch_one(&pool)
            .await?;
    if exists {
        println!("[skip] Database already seeded");
        return Ok(());
    }

    seed_account(&pool, "admin@parklot.local", UserRole::Admin, "Administrator").await?;
    let owner_id =
        seed_account(&pool, "owner@parklot.local", UserRole::LotOwner, "Ayesha Khan").await?;
    let driver_id =
        seed_account(&pool, "driver@parklot.local", UserRole::CarOwner, "Bilal Ahmed").await?;

    let lot_ids = seed_lots(&pool, owner_id).await?;
    let car_ids = seed_cars(&pool, driver_id).await?;
    seed_sessions(&pool, &lot_ids, &car_ids).await?;

    println!("\n=== Seed complete! ===");
    println!("Logins (password {SEED_PASSWORD}): admin@, owner@, driver@parklot.local");

    Ok(())
}

async fn seed_account(pool: &PgPool, email: &str, role: UserRole, name: &str) -> anyhow::Result<i32> {
    let user = auth::create_user(
        pool,
        &CreateUser {
            email: email.to_string(),
            password: SEED_PASSWORD.to_string(),
            role,
            name: name.to_string(),
            phone_no: Some("03001234567".to_string()),
        },
    )
    .await?;
    println!("[done] {email} ({})", role.as_claim());
    Ok(user.id)
}

async fn seed_lots(pool: &PgPool, owner_id: i32) -> anyhow::Result<Vec<i32>> {
    let lots = [
        ("Harbour Front", "Karachi", vec![20, 20, 20]),
        ("Mall Road Plaza", "Lahore", vec![40, 30]),
        ("Blue Area Tower", "Islamabad", vec![25, 25, 25, 25]),
    ];

    let mut ids = Vec::new();
    for (name, city, zones) in lots {
        let input = NewLot {
            lot_name: name.to_string(),
            total_capacity: zones.iter().sum(),
            postal_code: "44000".to_string(),
            address_l1: format!("1 {name}"),
            address_l2: None,
            city: city.to_string(),
            country: "Pakistan".to_string(),
            zones,
        };
        match lot::add_lot(pool, owner_id, &input).await? {
            LotCreation::Created { lot_id, zones } => {
                println!("[done] Lot {lot_id} '{name}' with {} zones", zones.len());
                ids.push(lot_id);
            }
            LotCreation::Rejected => println!("[skip] Lot '{name}' rejected"),
        }
    }
    Ok(ids)
}

async fn seed_cars(pool: &PgPool, owner_id: i32) -> anyhow::Result<Vec<i32>> {
    let cars = [("LEA-1234", "Sedan"), ("KHI-5678", "SUV"), ("ISB-9012", "Hatchback")];
    let mut ids = Vec::new();
    for (plate, car_type) in cars {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO cars (car_owner_id, plate_no, type) VALUES ($1, $2, $3) RETURNING car_id",
        )
        .bind(owner_id)
        .bind(plate)
        .bind(car_type)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    println!("[done] {} cars", ids.len());
    Ok(ids)
}

/// Two weeks of completed sessions spread over the day, plus one car still
/// parked in the first lot.
async fn seed_sessions(pool: &PgPool, lot_ids: &[i32], car_ids: &[i32]) -> anyhow::Result<()> {
    let mut count = 0;
    for day in 0..14i32 {
        for (i, &lot_id) in lot_ids.iter().enumerate() {
            let car_id = car_ids[(day as usize + i) % car_ids.len()];
            let hour = 8 + (day + i as i32 * 3) % 12;
            let minutes = 45 + (day * 17) % 180;
            sqlx::query(
                r#"
                INSERT INTO parking_sessions (car_id, lot_id, in_time, out_time, charge, rating)
                VALUES (
                    $1, $2,
                    date_trunc('day', NOW()) - make_interval(days => $3) + make_interval(hours => $4),
                    date_trunc('day', NOW()) - make_interval(days => $3) + make_interval(hours => $4, mins => $5),
                    ($5 / 60.0 * 150)::NUMERIC(10, 2),
                    $6
                )
                "#,
            )
            .bind(car_id)
            .bind(lot_id)
            .bind(day + 1)
            .bind(hour)
            .bind(minutes)
            .bind((1 + (day + i as i32) % 5) as i16)
            .execute(pool)
            .await?;
            count += 1;
        }
    }

    if let (Some(&lot_id), Some(&car_id)) = (lot_ids.first(), car_ids.first()) {
        sqlx::query("INSERT INTO parking_sessions (car_id, lot_id, in_time) VALUES ($1, $2, NOW())")
            .bind(car_id)
            .bind(lot_id)
            .execute(pool)
            .await?;
        sqlx::query("UPDATE lots SET space_available = space_available - 1 WHERE lot_id = $1")
            .bind(lot_id)
            .execute(pool)
            .await?;
        count += 1;
    }

    println!("[done] {count} parking sessions");
    Ok(())
}
