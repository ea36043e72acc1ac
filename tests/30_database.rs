// Repository and use-case flows against a real Postgres.
//
// Runs only when DATABASE_URL is set. Every test works inside one unit of
// work that is dropped without commit, so nothing is left behind.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use restaurant_api::auth::AuthUser;
use restaurant_api::config::{AppConfig, ReservationConfig};
use restaurant_api::database::models::recipe::RecipeItemInput;
use restaurant_api::database::models::{
    IngredientInput, MenuInput, NewInventory, NewReservation, RecipeInput, RegisterInput, ReservationStatus,
    TableFields, User, UserRole,
};
use restaurant_api::database::repository::{ingredient, inventory, menu, reservation, table, user};
use restaurant_api::database::{Database, UnitOfWork};
use restaurant_api::domain::DomainError;
use restaurant_api::services::{auth_service, catalog_service, InventoryService, ReservationService};
use restaurant_api::validation::Validate;

async fn database() -> Result<Option<Database>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping");
        return Ok(None);
    };
    let mut config = AppConfig::development().database;
    config.url = url;
    config.max_connections = 2;
    let db = Database::connect(&config).await?;
    db.migrate().await?;
    Ok(Some(db))
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

async fn seed_table(uow: &mut UnitOfWork) -> Result<Uuid> {
    // Large random numbers stay clear of tables a developer created by hand
    let number = 100_000 + (Uuid::new_v4().as_u128() % 1_000_000_000) as i32;
    let created = table::insert(
        uow.conn(),
        &TableFields {
            number,
            capacity: 4,
            location: None,
        },
    )
    .await?;
    Ok(created.id)
}

async fn seed_user(uow: &mut UnitOfWork) -> Result<User> {
    let email = format!("{}@bistro.example", suffix());
    Ok(user::insert(uow.conn(), "Robin", &email, "not-a-hash", UserRole::Customer).await?)
}

fn staff() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        email: "host@bistro.example".into(),
        role: UserRole::Staff,
    }
}

fn booking(table_id: Uuid, date: &str, time: &str) -> NewReservation {
    NewReservation {
        table_id,
        date: d(date),
        time: t(time),
        guest_count: 2,
    }
}

#[tokio::test]
async fn confirmed_lookup_skips_pending_deleted_and_other_days() -> Result<()> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let mut uow = db.begin().await?;
    let table_id = seed_table(&mut uow).await?;
    let guest = seed_user(&mut uow).await?;

    let confirmed = reservation::insert(uow.conn(), guest.id, &booking(table_id, "2030-06-01", "18:00:00")).await?;
    reservation::set_status(uow.conn(), confirmed.id, ReservationStatus::Confirmed).await?;
    reservation::insert(uow.conn(), guest.id, &booking(table_id, "2030-06-01", "12:00:00")).await?;
    let gone = reservation::insert(uow.conn(), guest.id, &booking(table_id, "2030-06-01", "21:00:00")).await?;
    reservation::set_status(uow.conn(), gone.id, ReservationStatus::Confirmed).await?;
    reservation::RESERVATIONS.soft_delete(uow.conn(), gone.id).await?;
    let next_day = reservation::insert(uow.conn(), guest.id, &booking(table_id, "2030-06-02", "18:00:00")).await?;
    reservation::set_status(uow.conn(), next_day.id, ReservationStatus::Confirmed).await?;

    let rows = reservation::confirmed_for_table_on(uow.conn(), table_id, d("2030-06-01")).await?;
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![confirmed.id]);

    assert!(table::lock(uow.conn(), table_id).await?);
    assert!(!table::lock(uow.conn(), Uuid::new_v4()).await?);
    Ok(())
}

#[tokio::test]
async fn restore_into_a_rebooked_slot_is_a_conflict() -> Result<()> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let service = ReservationService::new(&ReservationConfig::default());
    let mut uow = db.begin().await?;
    let table_id = seed_table(&mut uow).await?;
    let guest = seed_user(&mut uow).await?;

    let original = service.create(&mut uow, guest.id, booking(table_id, "2030-06-01", "18:00:00")).await?;
    service.change_status(&mut uow, original.id, ReservationStatus::Confirmed).await?;
    service.delete(&mut uow, original.id).await?;

    let replacement = service.create(&mut uow, guest.id, booking(table_id, "2030-06-01", "18:30:00")).await?;
    service.change_status(&mut uow, replacement.id, ReservationStatus::Confirmed).await?;

    let err = service.restore(&mut uow, original.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

    let live = reservation::confirmed_for_table_on(uow.conn(), table_id, d("2030-06-01")).await?;
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, replacement.id);

    // Still reachable for staff once the slot frees up again
    service.change_status(&mut uow, replacement.id, ReservationStatus::Canceled).await?;
    let restored = service.restore(&mut uow, original.id).await?;
    assert!(!restored.deleted);
    assert_eq!(service.get(&mut uow, &staff(), original.id).await?.status, ReservationStatus::Confirmed);
    Ok(())
}

#[tokio::test]
async fn recipe_quantities_survive_storage_and_keep_their_order() -> Result<()> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let mut uow = db.begin().await?;

    let pancakes = menu::insert(
        uow.conn(),
        &MenuInput {
            name: "Pancakes".into(),
            price: Some(Decimal::new(850, 2)),
            ..Default::default()
        },
    )
    .await?;
    let flour = ingredient::insert(
        uow.conn(),
        &IngredientInput {
            name: format!("flour-{}", suffix()),
            unit: "kg".into(),
        },
    )
    .await?;
    let eggs = ingredient::insert(
        uow.conn(),
        &IngredientInput {
            name: format!("eggs-{}", suffix()),
            unit: "pcs".into(),
        },
    )
    .await?;

    // 1.000 kg flour at 0.125 per portion, 5 eggs at 2 per portion
    catalog_service::create_inventory(uow.conn(), &NewInventory { ingredient_id: flour.id, quantity: Decimal::new(1000, 3) }).await?;
    catalog_service::create_inventory(uow.conn(), &NewInventory { ingredient_id: eggs.id, quantity: Decimal::from(5) }).await?;

    let fields = RecipeInput {
        name: "Pancakes".into(),
        description: None,
        items: vec![
            RecipeItemInput {
                ingredient_id: Some(eggs.id),
                quantity: Some(Decimal::from(2)),
            },
            RecipeItemInput {
                ingredient_id: Some(flour.id),
                quantity: Some(Decimal::new(125, 3)),
            },
        ],
    }
    .validate()?;
    let stored = catalog_service::replace_recipe(uow.conn(), pancakes.id, &fields).await?;
    let order: Vec<Uuid> = stored.items.iter().map(|i| i.ingredient_id).collect();
    assert_eq!(order, vec![eggs.id, flour.id]);
    assert_eq!(stored.items[1].quantity, Decimal::new(125, 3));

    let result = InventoryService::portions_for_menu(&mut uow, pancakes.id).await?;
    assert_eq!(result.portions, 2);
    assert_eq!(result.limiting_ingredient, eggs.id);

    // Replacing the recipe swaps items and order in place
    let reordered = RecipeInput {
        name: "Pancakes".into(),
        description: Some("Flour first".into()),
        items: vec![RecipeItemInput {
            ingredient_id: Some(flour.id),
            quantity: Some(Decimal::new(250, 3)),
        }],
    }
    .validate()?;
    let replaced = catalog_service::replace_recipe(uow.conn(), pancakes.id, &reordered).await?;
    assert_eq!(replaced.id, stored.id);
    assert_eq!(replaced.items.len(), 1);
    assert_eq!(replaced.items[0].position, 0);

    let stock = inventory::find_by_ingredient(uow.conn(), flour.id).await?.unwrap();
    assert_eq!(stock.quantity, Decimal::new(1000, 3));
    assert_eq!(InventoryService::portions_for_menu(&mut uow, pancakes.id).await?.portions, 4);
    Ok(())
}

#[tokio::test]
async fn only_one_account_can_bootstrap_staff() -> Result<()> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let mut uow = db.begin().await?;

    let register = |name: &str| RegisterInput {
        name: name.into(),
        email: format!("{}@bistro.example", suffix()),
        password: "correct horse battery".into(),
    };

    let first = auth_service::register(uow.conn(), &register("Ana")).await?;
    let second = auth_service::register(uow.conn(), &register("Ben")).await?;

    // The first may be customer when staff already exists in this database
    assert!(user::has_staff(uow.conn()).await?);
    assert_eq!(second.role, UserRole::Customer);
    assert!(first.role == UserRole::Staff || first.role == UserRole::Customer);
    Ok(())
}
