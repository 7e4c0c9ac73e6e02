use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, User, UserNew};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_cost(4)
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn register(engine: &Engine, name: &str) -> User {
    engine
        .create_user(UserNew::new(
            name,
            format!("{name}@finledger.test"),
            "password",
        ))
        .await
        .unwrap()
}
