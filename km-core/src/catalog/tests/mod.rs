
use assert_fs::TempDir;
use km_testutils::*;
use rstest::*;

use super::*;

#[fixture]
fn catalog(kubemart_root: TempDir) -> (TempDir, Catalog) {
    let catalog = Catalog::new(&KubemartPaths::new(kubemart_root.path()));
    (kubemart_root, catalog)
}
