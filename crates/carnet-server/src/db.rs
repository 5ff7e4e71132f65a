use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::models::RecetteDraft;
use crate::schema::recettes;
use crate::store;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// SQLite serializes conflicting writes itself; the busy timeout keeps a
/// second pooled connection waiting instead of erroring out.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str) -> DbPool {
    if let Some(parent) = std::path::Path::new(database_url).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create database directory {:?}: {}", parent, e);
            }
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .expect("Failed to create database pool");

    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");

    // Schema evolution is logged, never fatal: an old database that cannot
    // take the image_url column still serves everything else.
    match conn.run_pending_migrations(MIGRATIONS) {
        Ok(applied) if !applied.is_empty() => {
            tracing::info!("Applied {} pending database migrations", applied.len())
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Failed to run database migrations: {}", e),
    }

    if let Err(e) = seed_if_empty(&mut conn) {
        tracing::error!("Failed to seed example recipes: {}", e);
    }

    drop(conn);
    pool
}

struct SeedRecette {
    titre: &'static str,
    description: &'static str,
    categorie: &'static str,
    temps_preparation: i32,
    difficulte: &'static str,
    emoji: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
}

impl SeedRecette {
    fn draft(&self) -> RecetteDraft {
        RecetteDraft {
            titre: Some(self.titre.to_string()),
            description: Some(self.description.to_string()),
            categorie: Some(self.categorie.to_string()),
            temps_preparation: Some(self.temps_preparation),
            difficulte: Some(self.difficulte.to_string()),
            emoji: Some(self.emoji.to_string()),
            ingredients: Some(self.ingredients.iter().map(|s| s.to_string()).collect()),
            instructions: Some(self.instructions.iter().map(|s| s.to_string()).collect()),
            image_url: None,
        }
    }
}

const SAMPLE_RECETTES: &[SeedRecette] = &[
    SeedRecette {
        titre: "Risotto aux champignons",
        description: "Un délicieux risotto crémeux aux champignons de saison, parfait pour un dîner réconfortant et savoureux.",
        categorie: "cuisine",
        temps_preparation: 35,
        difficulte: "Facile",
        emoji: "🥘",
        ingredients: &[
            "300g de riz Arborio",
            "500g de champignons mélangés",
            "1L de bouillon de légumes",
            "1 oignon",
            "100ml de vin blanc",
            "50g de parmesan",
            "Huile d'olive",
        ],
        instructions: &[
            "Faire chauffer le bouillon",
            "Faire revenir l'oignon haché",
            "Ajouter le riz et nacrer 2 minutes",
            "Ajouter le vin blanc",
            "Incorporer le bouillon louche par louche",
            "Ajouter les champignons sautés",
            "Terminer avec le parmesan",
        ],
    },
    SeedRecette {
        titre: "Mojito Classic",
        description: "Le cocktail cubain traditionnel à base de rhum blanc, menthe fraîche et citron vert. Rafraîchissant et parfait pour l'été.",
        categorie: "cocktails",
        temps_preparation: 5,
        difficulte: "Facile",
        emoji: "🍸",
        ingredients: &[
            "6cl de rhum blanc",
            "10 feuilles de menthe fraîche",
            "1/2 citron vert",
            "2 cuillères à café de sucre de canne",
            "Eau gazeuse",
            "Glaçons",
        ],
        instructions: &[
            "Mettre la menthe et le sucre dans un verre",
            "Piler délicatement",
            "Ajouter le jus de citron vert",
            "Ajouter le rhum",
            "Remplir de glaçons",
            "Compléter avec l'eau gazeuse",
            "Mélanger et décorer",
        ],
    },
];

/// Seeds the two demo recipes on a first-ever startup. A convenience for
/// demos, not part of the API contract.
fn seed_if_empty(conn: &mut SqliteConnection) -> Result<(), store::StoreError> {
    let count: i64 = recettes::table.count().get_result(conn)?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("Empty database, inserting example recipes");
    for seed in SAMPLE_RECETTES {
        store::create(conn, &seed.draft())?;
    }

    Ok(())
}
