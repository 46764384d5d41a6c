//! Unit tests for IngressSpec validation and serialization

#[cfg(test)]
mod ingress_spec_validation {
    use crate::crd::{Ingress, IngressSpec, IngressTls};
    use crate::secrets::SecretKey;

    fn tls(hosts: &[&str], name: &str, namespace: &str) -> IngressTls {
        IngressTls {
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            secret_name: name.to_string(),
            secret_namespace: namespace.to_string(),
        }
    }

    #[test]
    fn test_valid_spec_passes() {
        let spec = IngressSpec {
            tls: vec![tls(&["example.com"], "secret0", "knative-serving")],
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_spec_without_tls_is_valid() {
        assert!(IngressSpec::default().validate().is_ok());
    }

    #[test]
    fn test_empty_hosts_rejected() {
        let spec = IngressSpec {
            tls: vec![tls(&[], "secret0", "knative-serving")],
        };
        let errors = spec.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "spec.tls[0].hosts");
    }

    #[test]
    fn test_all_errors_reported() {
        let spec = IngressSpec {
            tls: vec![
                tls(&["example.com"], "secret0", "knative-serving"),
                tls(&[""], "", ""),
            ],
        };
        let errors = spec.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "spec.tls[1].hosts",
                "spec.tls[1].secretName",
                "spec.tls[1].secretNamespace",
            ]
        );
    }

    #[test]
    fn test_secret_key_from_tls() {
        let t = tls(&["example.com"], "secret0", "knative-serving");
        assert_eq!(t.secret_key(), SecretKey::new("knative-serving", "secret0"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let yaml = r#"
apiVersion: networking.internal.knative.dev/v1alpha1
kind: Ingress
metadata:
  name: ingress
  namespace: knative-serving
spec:
  tls:
    - hosts: ["example.com"]
      secretName: secret0
      secretNamespace: knative-serving
"#;
        let ingress: Ingress = serde_yaml::from_str(yaml).expect("Failed to deserialize Ingress");
        assert_eq!(ingress.spec.tls.len(), 1);
        assert_eq!(ingress.spec.tls[0].secret_name, "secret0");
        assert_eq!(ingress.spec.tls[0].secret_namespace, "knative-serving");
    }

    #[test]
    fn test_crd_metadata() {
        use kube::CustomResourceExt;
        let crd = Ingress::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("ingresses.networking.internal.knative.dev")
        );
        assert_eq!(crd.spec.names.kind, "Ingress");
    }

    #[test]
    fn test_crd_schema_exposes_tls_secret_reference() {
        use kube::CustomResourceExt;
        let crd = serde_json::to_value(Ingress::crd()).unwrap();
        let version = &crd["spec"]["versions"][0];
        assert_eq!(version["name"], "v1alpha1");

        let tls = &version["schema"]["openAPIV3Schema"]["properties"]["spec"]["properties"]["tls"];
        assert_eq!(tls["type"], "array");
        let item = &tls["items"]["properties"];
        assert!(item.get("secretName").is_some());
        assert!(item.get("secretNamespace").is_some());
        assert!(item.get("hosts").is_some());
    }
}
