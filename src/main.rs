use dotenvy::dotenv;

use shelfmark::cli;
use shelfmark::logging::init_tracing;
use shelfmark::router::init_router;
use shelfmark::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "set-role" {
        handle_set_role(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:3000/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_set_role(args: Vec<String>) {
    if args.len() != 4 {
        eprintln!("Usage: {} set-role <email> <role>", args[0]);
        std::process::exit(1);
    }

    let email = &args[2];
    let Some(role) = cli::parse_role(&args[3]) else {
        eprintln!("❌ Unknown role '{}'. Available roles: user, admin", args[3]);
        std::process::exit(1);
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli::set_user_role(&pool, email, role).await {
        Ok(user) => {
            println!("✅ Role updated successfully!");
            println!("   Email: {}", user.email);
            println!("   Role: {:?}", user.role);
        }
        Err(e) => {
            eprintln!("❌ Error setting role: {}", e.error);
            std::process::exit(1);
        }
    }
}
