use clap::{Parser, Subcommand};
use futures::future::try_join_all;
use ingress_secret_sync::config::{
    GatewayTopology, DEFAULT_CONFIG_MAP_NAME, DEFAULT_CONFIG_NAMESPACE,
};
use ingress_secret_sync::crd::Ingress;
use ingress_secret_sync::secrets::{plan_secrets, SecretCache};
use ingress_secret_sync::Error;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::Api;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the gateway Secrets an Ingress needs, as YAML
    Plan(PlanArgs),
    /// Show version information
    Version,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Name of the Ingress
    ingress: String,

    /// Namespace of the Ingress
    #[arg(long, short, env = "INGRESS_NAMESPACE", default_value = "default")]
    namespace: String,

    /// ConfigMap holding the gateway configuration
    #[arg(long, env = "GATEWAY_CONFIG_MAP", default_value = DEFAULT_CONFIG_MAP_NAME)]
    config_map: String,

    /// Namespace of the gateway ConfigMap
    #[arg(long, env = "GATEWAY_CONFIG_NAMESPACE", default_value = DEFAULT_CONFIG_NAMESPACE)]
    config_namespace: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(args.log_json);

    match args.command {
        Commands::Version => {
            println!("ingress-secret-sync v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Plan(plan_args) => run_plan(plan_args).await,
    }
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

async fn run_plan(args: PlanArgs) -> Result<(), Error> {
    let client = kube::Client::try_default()
        .await
        .map_err(Error::KubeError)?;
    info!("Connected to Kubernetes cluster");

    let ingresses: Api<Ingress> = Api::namespaced(client.clone(), &args.namespace);
    let ingress = ingresses.get(&args.ingress).await?;

    let config_maps: Api<ConfigMap> = Api::namespaced(client.clone(), &args.config_namespace);
    let config_map = config_maps.get_opt(&args.config_map).await?.ok_or_else(|| {
        Error::ConfigError(format!(
            "ConfigMap {}/{} not found",
            args.config_namespace, args.config_map
        ))
    })?;
    let topology = GatewayTopology::from_config_map(&config_map);

    // Only the referenced Secrets are fetched; missing ones are left out so
    // the resolver reports them.
    let fetches = ingress.spec.tls.iter().map(|tls| {
        let api: Api<Secret> = Api::namespaced(client.clone(), &tls.secret_namespace);
        let name = tls.secret_name.clone();
        async move { api.get_opt(&name).await }
    });
    let cache: SecretCache = try_join_all(fetches).await?.into_iter().flatten().collect();

    let plan = match plan_secrets(&ingress, &cache, &topology) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(
                error = %e,
                retryable = e.is_retryable(),
                "Failed to plan gateway secrets"
            );
            return Err(e);
        }
    };

    for secret in plan.all() {
        println!("---");
        print!("{}", serde_yaml::to_string(secret)?);
    }
    Ok(())
}
