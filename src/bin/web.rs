//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `Config::load` for the environment it reads.

use actix_files::Files;
use actix_web::{
    delete, get, post,
    http::header,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cwl_roster_web::{
    build_roster, cross_reference, export_pdf, move_down, move_player, move_up, render_message,
    ClanDescriptor, ClashClient, Config, NewRegistration, PlayerRegistration, RegistrationId,
    RegistrationStore, RosterError, RosterId, RosterPartition, StoreError, LEAGUE_TIERS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-session entry: roster under construction + last activity time (for auto-cleanup).
struct RosterEntry {
    partition: RosterPartition,
    last_activity: Instant,
}

/// In-memory roster sessions by id. Entries are removed after the configured idle time.
type Rosters = Data<RwLock<HashMap<RosterId, RosterEntry>>>;

/// Registrations, saved clans and message history.
type Store = Data<RwLock<RegistrationStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// One clan of a roster, with members resolved for display.
#[derive(Serialize)]
struct BucketView<'a> {
    index: usize,
    name: &'a str,
    capacity: u32,
    league_tier: &'a str,
    members: Vec<&'a PlayerRegistration>,
    deficit: usize,
    over_capacity: bool,
}

#[derive(Serialize)]
struct RosterView<'a> {
    id: RosterId,
    buckets: Vec<BucketView<'a>>,
    message: String,
}

impl<'a> RosterView<'a> {
    fn new(id: RosterId, partition: &'a RosterPartition) -> Self {
        let buckets = partition
            .buckets
            .iter()
            .enumerate()
            .map(|(index, b)| BucketView {
                index,
                name: &b.descriptor.name,
                capacity: b.descriptor.capacity,
                league_tier: &b.descriptor.league_tier,
                members: partition.members(index),
                deficit: b.deficit(),
                over_capacity: b.is_over_capacity(),
            })
            .collect();
        Self {
            id,
            buckets,
            message: render_message(partition),
        }
    }
}

#[derive(Deserialize)]
struct ClansBody {
    #[serde(default)]
    clans: Vec<ClanDescriptor>,
}

#[derive(Deserialize)]
struct MovePlayerBody {
    registration_id: RegistrationId,
    from: usize,
    to: usize,
}

#[derive(Deserialize)]
struct ReorderBody {
    bucket: usize,
    index: usize,
}

#[derive(Deserialize)]
struct ExportPdfBody {
    #[serde(default)]
    message: String,
}

/// Path segment: roster id (e.g. /api/rosters/{id})
#[derive(Deserialize)]
struct RosterPath {
    id: RosterId,
}

/// Path segment: clan tag, with or without '#'.
#[derive(Deserialize)]
struct ClanTagPath {
    clan_tag: String,
}

fn error_body(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(error_body("lock error"))
}

fn store_error(e: StoreError) -> HttpResponse {
    match e {
        StoreError::EmptyField(_) | StoreError::ZeroCapacity => {
            HttpResponse::BadRequest().json(error_body(e))
        }
        StoreError::Io(_) | StoreError::Csv(_) => {
            log::error!("Storage failure: {}", e);
            HttpResponse::InternalServerError().json(error_body(e))
        }
    }
}

fn roster_error(e: RosterError) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body(e))
}

fn no_roster() -> HttpResponse {
    HttpResponse::NotFound().json(error_body("Nessun roster"))
}

/// Drop clans the form left incomplete (blank name or league, zero participants).
fn complete_clans(clans: Vec<ClanDescriptor>) -> Vec<ClanDescriptor> {
    clans
        .into_iter()
        .filter(|c| !c.name.trim().is_empty() && !c.league_tier.trim().is_empty() && c.capacity > 0)
        .map(|c| ClanDescriptor::new(c.name.trim(), c.capacity, c.league_tier.trim()))
        .collect()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cwl-roster-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/api/leagues")]
async fn api_leagues() -> HttpResponse {
    HttpResponse::Ok().json(LEAGUE_TIERS)
}

/// All registrations, in registration order.
#[get("/api/player-registrations")]
async fn api_list_registrations(store: Store) -> HttpResponse {
    let g = match store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.registrations())
}

/// Public registration form.
#[post("/api/player-registrations")]
async fn api_register(store: Store, body: Json<NewRegistration>) -> HttpResponse {
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_registration(body.into_inner()) {
        Ok(r) => {
            log::info!("Registered {} ({})", r.player_name, r.level_tag);
            HttpResponse::Ok().json(r)
        }
        Err(e) => store_error(e),
    }
}

/// Bulk clear (admin).
#[delete("/api/player-registrations")]
async fn api_clear_registrations(store: Store) -> HttpResponse {
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let count = g.len();
    match g.clear_registrations() {
        Ok(()) => {
            log::info!("Cleared {} registration(s)", count);
            HttpResponse::Ok().json(serde_json::json!({ "message": "Registrazioni cancellate con successo" }))
        }
        Err(e) => store_error(e),
    }
}

/// Registrations as a CSV download.
#[get("/api/player-registrations/export.csv")]
async fn api_export_registrations(store: Store) -> HttpResponse {
    let g = match store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.registrations_csv() {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"iscrizioni.csv\"",
            ))
            .body(csv),
        Err(e) => store_error(e),
    }
}

#[get("/api/clans")]
async fn api_list_clans(store: Store) -> HttpResponse {
    let g = match store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.clans())
}

#[post("/api/clans")]
async fn api_add_clan(store: Store, body: Json<ClanDescriptor>) -> HttpResponse {
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_clan(body.into_inner()) {
        Ok(clan) => HttpResponse::Ok().json(clan),
        Err(e) => store_error(e),
    }
}

#[get("/api/messages")]
async fn api_list_messages(store: Store) -> HttpResponse {
    let g = match store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.messages())
}

/// Start a roster session: round-robin the current registrations over the given clans.
#[post("/api/rosters")]
async fn api_create_roster(store: Store, rosters: Rosters, body: Json<ClansBody>) -> HttpResponse {
    let clans = complete_clans(body.into_inner().clans);
    let partition = {
        let g = match store.read() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match build_roster(&clans, g.registrations()) {
            Ok(p) => p,
            Err(e) => return roster_error(e),
        }
    };

    let id = Uuid::new_v4();
    let mut g = match rosters.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!(
        "Built roster {} with {} clan(s) and {} player(s)",
        id,
        partition.buckets.len(),
        partition.total_members()
    );
    let entry = g.entry(id).or_insert(RosterEntry {
        partition,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(RosterView::new(id, &entry.partition))
}

/// Get a roster by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/rosters/{id}")]
async fn api_get_roster(rosters: Rosters, path: Path<RosterPath>) -> HttpResponse {
    let mut g = match rosters.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(RosterView::new(path.id, &entry.partition))
        }
        None => no_roster(),
    }
}

/// Move a player to another clan (appended at the end).
#[post("/api/rosters/{id}/move")]
async fn api_move_player(
    rosters: Rosters,
    path: Path<RosterPath>,
    body: Json<MovePlayerBody>,
) -> HttpResponse {
    let mut g = match rosters.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_roster(),
    };
    entry.last_activity = Instant::now();
    let partition = std::mem::take(&mut entry.partition);
    entry.partition = move_player(partition, body.registration_id, body.from, body.to);
    HttpResponse::Ok().json(RosterView::new(path.id, &entry.partition))
}

#[post("/api/rosters/{id}/move-up")]
async fn api_move_up(rosters: Rosters, path: Path<RosterPath>, body: Json<ReorderBody>) -> HttpResponse {
    let mut g = match rosters.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_roster(),
    };
    entry.last_activity = Instant::now();
    let partition = std::mem::take(&mut entry.partition);
    entry.partition = move_up(partition, body.bucket, body.index);
    HttpResponse::Ok().json(RosterView::new(path.id, &entry.partition))
}

#[post("/api/rosters/{id}/move-down")]
async fn api_move_down(rosters: Rosters, path: Path<RosterPath>, body: Json<ReorderBody>) -> HttpResponse {
    let mut g = match rosters.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_roster(),
    };
    entry.last_activity = Instant::now();
    let partition = std::mem::take(&mut entry.partition);
    entry.partition = move_down(partition, body.bucket, body.index);
    HttpResponse::Ok().json(RosterView::new(path.id, &entry.partition))
}

/// Render the roster message and keep it in the history.
#[post("/api/rosters/{id}/message")]
async fn api_roster_message(store: Store, rosters: Rosters, path: Path<RosterPath>) -> HttpResponse {
    let message = {
        let mut g = match rosters.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let entry = match g.get_mut(&path.id) {
            Some(e) => e,
            None => return no_roster(),
        };
        entry.last_activity = Instant::now();
        render_message(&entry.partition)
    };
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.save_message(message.clone());
    HttpResponse::Ok().json(MessageResponse { message })
}

/// One-shot: build from the current registrations and render, without keeping a session.
#[post("/api/generate-message")]
async fn api_generate_message(store: Store, body: Json<ClansBody>) -> HttpResponse {
    let clans = complete_clans(body.into_inner().clans);
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let partition = match build_roster(&clans, g.registrations()) {
        Ok(p) => p,
        Err(e) => return roster_error(e),
    };
    let message = render_message(&partition);
    g.save_message(message.clone());
    log::info!("Generated CWL message for {} clan(s)", clans.len());
    HttpResponse::Ok().json(MessageResponse { message })
}

#[post("/api/export-pdf")]
async fn api_export_pdf(body: Json<ExportPdfBody>) -> HttpResponse {
    let message = body.into_inner().message;
    if message.trim().is_empty() {
        return HttpResponse::BadRequest().json(error_body("Genera prima un messaggio da esportare"));
    }
    match tokio::task::spawn_blocking(move || export_pdf(&message)).await {
        Ok(Ok(bytes)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cwl-message.pdf\"",
            ))
            .body(bytes),
        Ok(Err(e)) => {
            log::error!("PDF export failed: {}", e);
            HttpResponse::InternalServerError().json(error_body(e))
        }
        Err(e) => {
            log::error!("PDF export task failed: {}", e);
            HttpResponse::InternalServerError().json(error_body("Errore nella generazione del PDF"))
        }
    }
}

/// Live member statistics for a clan.
#[get("/api/clash-players/{clan_tag}")]
async fn api_clash_players(clash: Data<ClashClient>, path: Path<ClanTagPath>) -> HttpResponse {
    match clash.clan_members(&path.clan_tag).await {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => {
            log::warn!("Clash API error for {}: {}", path.clan_tag, e);
            HttpResponse::InternalServerError()
                .json(error_body("Errore nel recupero dei dati da Clash of Clans API"))
        }
    }
}

/// Registrants paired with the clan member of the same name.
#[get("/api/clash-players/{clan_tag}/registrants")]
async fn api_clash_registrants(
    store: Store,
    clash: Data<ClashClient>,
    path: Path<ClanTagPath>,
) -> HttpResponse {
    let players = match clash.clan_members(&path.clan_tag).await {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Clash API error for {}: {}", path.clan_tag, e);
            return HttpResponse::InternalServerError()
                .json(error_body("Errore nel recupero dei dati da Clash of Clans API"));
        }
    };
    let g = match store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(cross_reference(g.registrations(), &players))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::load();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let registration_store = RegistrationStore::with_data_dir(&config.data_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    log::info!("Registration roll file: {}", config.data_dir.join(cwl_roster_web::store::ROLL_FILE).display());
    let store = Data::new(RwLock::new(registration_store));

    let clash = ClashClient::new(config.clash_api_base_url.clone(), config.clash_api_key.clone());
    if !clash.has_api_key() {
        log::warn!("CLASH_API_KEY not set: player statistics will be unavailable");
    }
    let clash = Data::new(clash);

    let rosters: Rosters = Data::new(RwLock::new(HashMap::new()));

    // Background task: every 30 minutes, remove roster sessions idle past the timeout
    let rosters_cleanup = rosters.clone();
    let idle_timeout = config.roster_idle_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match rosters_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < idle_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} idle roster session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(rosters.clone())
            .app_data(clash.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_leagues)
            .service(api_export_registrations)
            .service(api_list_registrations)
            .service(api_register)
            .service(api_clear_registrations)
            .service(api_list_clans)
            .service(api_add_clan)
            .service(api_list_messages)
            .service(api_create_roster)
            .service(api_get_roster)
            .service(api_move_player)
            .service(api_move_up)
            .service(api_move_down)
            .service(api_roster_message)
            .service(api_generate_message)
            .service(api_export_pdf)
            .service(api_clash_registrants)
            .service(api_clash_players)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
