mod ssa_test;
mod util_test;

use httpmock::Method::*;
use km_testutils::*;
use rstest::*;
use serde_json::json;
use tracing_test::traced_test;

use super::*;
