use km_core::catalog::Catalog;
use km_core::prelude::*;

pub fn cmd(catalog: &Catalog) -> EmptyResult {
    for app in catalog.list_apps()? {
        println!("{app}");
    }
    Ok(())
}
