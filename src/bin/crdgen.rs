use ingress_secret_sync::crd::Ingress;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&Ingress::crd())?);
    Ok(())
}
