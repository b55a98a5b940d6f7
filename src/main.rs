#[cfg(feature = "ssr")]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::{anyhow, Context};
    use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
    use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use opentelemetry_configuration::OtelSdkBuilder;
    use portfolio::app::*;
    use portfolio::config::Config;
    use portfolio::fetch::{ContributionFetcher, HttpContributionSource};
    use tower::{timeout::TimeoutLayer, BoxError, ServiceBuilder};
    use tower_http::compression::CompressionLayer;

    let _guard = OtelSdkBuilder::new()
        .service_name(env!("CARGO_PKG_NAME"))
        .service_version(env!("CARGO_PKG_VERSION"))
        .resource_attribute("vcs.repository.name", env!("CARGO_PKG_NAME"))
        .resource_attribute("vcs.ref.head.revision", env!("VCS_REF_HEAD_REVISION"))
        .resource_attribute("vcs.ref.head.name", env!("VCS_REF_HEAD_NAME"))
        .resource_attribute("vcs.ref.head.type", "branch")
        .endpoint("http://127.0.0.1:4318")
        .with_standard_env()
        .build()
        .map_err(|e| anyhow!("failed to initialise OpenTelemetry: {e:?}"))?;

    let config = Config::load().context("failed to load configuration")?;

    let fetcher = match config.contributions.endpoint_url()? {
        Some(endpoint) => {
            let source = HttpContributionSource::new(endpoint, config.contributions.timeout())?;
            tracing::info!(endpoint = %source.endpoint(), "contributions endpoint configured");
            Some(ContributionFetcher::new(
                Arc::new(source),
                config.contributions.retry_policy(),
            ))
        }
        None => {
            tracing::warn!("no contributions endpoint configured, section will show its error state");
            None
        }
    };

    let conf = get_configuration(None).map_err(|e| anyhow!("invalid leptos options: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || {
                if let Some(fetcher) = fetcher.clone() {
                    provide_context(fetcher);
                }
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .layer(CompressionLayer::new())
        .layer(OtelInResponseLayer)
        .layer(OtelAxumLayer::default())
        .with_state(leptos_options);

    if let Some(socket_path) = config.socket.as_deref() {
        tracing::info!("listening on unix socket {}", socket_path);
        let listener = tokio::net::UnixListener::bind(socket_path)
            .with_context(|| format!("failed to bind {socket_path}"))?;
        axum::serve(listener, app.into_make_service()).await?;
    } else {
        tracing::info!("listening on http://{}", &config.listen);
        let listener = tokio::net::TcpListener::bind(config.listen.as_str())
            .await
            .with_context(|| format!("failed to bind {}", config.listen))?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
