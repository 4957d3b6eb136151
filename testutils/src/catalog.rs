use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::*;

const RABBITMQ_MANIFEST: &str = "namespace: rabbitmq\n";
const RABBITMQ_NOTES: &str = "RabbitMQ is ready, the management UI is exposed on port 15672.\n";

const MARIADB_MANIFEST: &str = r#"
namespace: mariadb
plans:
  - label: 5GB
    configuration:
      VOLUME_SIZE:
        value: 5Gi
  - label: 10GB
    configuration:
      VOLUME_SIZE:
        value: 10Gi
      UNUSED_KEY:
        value: ignored
  - label: 20GB
    configuration:
      VOLUME_SIZE:
        value: 20Gi
"#;

const WORDPRESS_MANIFEST: &str = r#"
namespace: wordpress
dependencies:
  - MariaDB:10GB
plans:
  - label: small
    configuration:
      REPLICAS:
        value: 1
  - label: broken
"#;

// A fake ~/.kubemart directory with a small marketplace mirror in it
pub fn fake_kubemart_root() -> TempDir {
    let root = TempDir::new().unwrap();
    let apps = root.child("apps");

    apps.child("rabbitmq/manifest.yaml").write_str(RABBITMQ_MANIFEST).unwrap();
    apps.child("rabbitmq/post_install.md").write_str(RABBITMQ_NOTES).unwrap();
    apps.child("mariadb/manifest.yaml").write_str(MARIADB_MANIFEST).unwrap();
    apps.child("wordpress/manifest.yaml").write_str(WORDPRESS_MANIFEST).unwrap();

    // things that aren't apps
    apps.child(".git/HEAD").write_str("ref: refs/heads/master\n").unwrap();
    apps.child("bin/check.sh").write_str("#!/bin/sh\n").unwrap();
    apps.child("README.md").write_str("# marketplace\n").unwrap();

    root
}

#[fixture]
pub fn kubemart_root() -> TempDir {
    fake_kubemart_root()
}
