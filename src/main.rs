use std::env;
use std::sync::Arc;

use bikeshare_dashboard::api::models::{DateSpan, RangeParameters};
use bikeshare_dashboard::api::shaping::build_response;
use bikeshare_dashboard::core_logic::aggregation::compute_dashboard;
use bikeshare_dashboard::core_logic::data_processing::{
    date_span, filter_date_range, normalize,
};
use bikeshare_dashboard::datasource::read_rentals;

use polars::frame::DataFrame;
use warp::{reject, Filter};

#[derive(Debug)]
struct InternalServerError;

impl reject::Reject for InternalServerError {}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    println!("Starting set up");

    let data_path = env::var("DATA_PATH").unwrap_or_else(|_| "all_data.csv".to_string());
    let records = read_rentals(&data_path).expect("failed to read the rental table");
    let table: Arc<DataFrame> =
        Arc::new(normalize(records).expect("failed to normalize the rental table"));
    let (min_date, max_date) = date_span(&table).expect("rental table has no date span");

    println!(
        "Loaded {} days of rentals ({} to {})",
        table.height(),
        min_date,
        max_date
    );

    let span_route = warp::path("span").map(move || warp::reply::json(&DateSpan { min_date, max_date }));

    let dashboard_route = warp::path("dashboard")
        .and(warp::query::<RangeParameters>())
        .and_then({
            let table = Arc::clone(&table);
            move |params: RangeParameters| {
                let table = Arc::clone(&table);
                async move {
                    // Missing bounds fall back to the full span; a swapped
                    // range simply selects no rows.
                    let start = params.start_date.unwrap_or(min_date);
                    let end = params.end_date.unwrap_or(max_date);

                    let response = filter_date_range(&table, start, end)
                        .and_then(|filtered| compute_dashboard(&filtered, &table))
                        .and_then(|tables| build_response(&tables));

                    match response {
                        Ok(data) => Ok(warp::reply::json(&data)),
                        Err(_) => Err(warp::reject::custom(InternalServerError)),
                    }
                }
            }
        });

    // Start the webserver
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8001".to_string())
        .parse()
        .expect("PORT must be a number");

    println!("Starting web server! on {}", port);
    warp::serve(span_route.or(dashboard_route))
        .run(([127, 0, 0, 1], port))
        .await;
}
