use crate::errors;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::session::SessionManager;
use crate::settings::{ServerSettings, SettingsError};
use crate::store::{MemoryStore, SessionStore};
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::{Reply, Response};
use warp::Filter;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    session_ttl: Duration,
    sweep_interval: Duration,
    seed: Option<u64>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let defaults = ServerSettings::default();
        Self {
            host: host.into(),
            port,
            session_ttl: defaults.session_ttl(),
            sweep_interval: defaults.sweep_interval(),
            seed: None,
        }
    }

    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            session_ttl: settings.session_ttl(),
            sweep_interval: settings.sweep_interval(),
            seed: settings.seed,
        }
    }

    /// Ephemeral port on loopback with a fixed seed.
    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0).with_seed(Some(7))
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Shared components handed to every route.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    sessions: Arc<SessionManager>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn SessionStore>) -> Self {
        let sessions = Arc::new(SessionManager::with_ttl(
            store,
            config.seed(),
            config.session_ttl(),
        ));
        Self { config, sessions }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Binds, spawns the server and the idle-session sweeper, and returns a
    /// handle that stops both.
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let config = context.config().clone();
        let bind_addr = Self::bind_addr(&config)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(
            address = %addr,
            session_ttl_secs = config.session_ttl().as_secs(),
            "web server listening"
        );

        let sweeper = Self::spawn_sweeper(context.sessions(), config.sweep_interval());
        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, sweeper, context))
    }

    /// All routes with request logging and JSON rejection bodies.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let api = Self::health_route()
            .or(Self::api_routes(context))
            .unify()
            .recover(errors::handle_rejection)
            .unify()
            .boxed();

        with_request_logging(api).boxed()
    }

    fn spawn_sweeper(sessions: Arc<SessionManager>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let expired = sessions.cleanup_expired_sessions();
                if !expired.is_empty() {
                    tracing::debug!(count = expired.len(), "swept idle sessions");
                }
            }
        })
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(io_err) = err
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return ServerError::BindError(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        ServerError::ConfigError(err.to_string())
    }

    fn health_route() -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health().into_response())
            .boxed()
    }

    fn api_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let sessions = context.sessions();

        let create = warp::path!("api" / "game")
            .and(warp::post())
            .and(Self::with_session_manager(sessions.clone()))
            .and_then(|sessions: Arc<SessionManager>| async move {
                Ok::<_, Infallible>(handlers::create_game(sessions).await)
            });

        let fetch = warp::path!("api" / "game" / String)
            .and(warp::get())
            .and(Self::with_session_manager(sessions.clone()))
            .and_then(
                |session_id: String, sessions: Arc<SessionManager>| async move {
                    Ok::<_, Infallible>(handlers::get_game(sessions, session_id).await)
                },
            );

        let action = warp::path!("api" / "game" / String / "action")
            .and(warp::post())
            .and(Self::with_session_manager(sessions.clone()))
            .and(warp::body::content_length_limit(4 * 1024))
            .and(warp::body::json())
            .and_then(
                |session_id: String,
                 sessions: Arc<SessionManager>,
                 request: handlers::ActionRequest| async move {
                    Ok::<_, Infallible>(
                        handlers::submit_action(sessions, session_id, request).await,
                    )
                },
            );

        let delete = warp::path!("api" / "game" / String)
            .and(warp::delete())
            .and(Self::with_session_manager(sessions))
            .and_then(
                |session_id: String, sessions: Arc<SessionManager>| async move {
                    Ok::<_, Infallible>(handlers::delete_game(sessions, session_id).await)
                },
            );

        create
            .or(action)
            .unify()
            .or(fetch)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    fn with_session_manager(
        sessions: Arc<SessionManager>,
    ) -> impl Filter<Extract = (Arc<SessionManager>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&sessions))
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    sweeper: Option<JoinHandle<()>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        sweeper: JoinHandle<()>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            sweeper: Some(sweeper),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }

        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        tracing::info!(address = %self.addr, "web server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }

        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_accepts_ip_and_socket_forms() {
        let addr = WebServer::bind_addr(&ServerConfig::new("127.0.0.1", 8123)).expect("ip");
        assert_eq!(addr.port(), 8123);

        let addr = WebServer::bind_addr(&ServerConfig::new("127.0.0.1:9001", 1)).expect("socket");
        assert_eq!(addr.port(), 9001);
    }

    #[test]
    fn config_follows_settings() {
        let settings = ServerSettings {
            session_timeout_minutes: 2,
            sweep_interval_secs: 10,
            seed: Some(5),
            ..ServerSettings::default()
        };
        let config = ServerConfig::from_settings(&settings);
        assert_eq!(config.session_ttl(), Duration::from_secs(120));
        assert_eq!(config.sweep_interval(), Duration::from_secs(10));
        assert_eq!(config.seed(), Some(5));
    }

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_shuts_down() {
        let handle = WebServer::new(ServerConfig::for_tests())
            .start()
            .await
            .expect("start server");
        assert_ne!(handle.address().port(), 0);
        assert!(handle.context().sessions().active_sessions().is_empty());
        handle.shutdown().await.expect("shutdown");
    }
}
