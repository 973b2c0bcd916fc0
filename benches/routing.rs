use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ferroute::{
    gtfs::{GtfsCalendar, GtfsData, GtfsRoute, GtfsStop, GtfsStopTime, GtfsTrip},
    prelude::*,
};
use std::{env, hint::black_box, time::Duration};

const GRID: usize = 30;
const HEADWAY: u32 = 600;
const HOP: u32 = 120;

fn platform(id: String, station: String) -> GtfsStop {
    GtfsStop {
        stop_id: id,
        stop_name: None,
        location_type: Some(0),
        parent_station: Some(station),
    }
}

/// A grid of horizontal and vertical lines. Every crossing is a station with
/// one platform per direction, so changing lines costs a transfer.
fn grid_network() -> GtfsData {
    let mut data = GtfsData::new();
    data.calendar.push(GtfsCalendar {
        service_id: "ALL".into(),
        monday: 1,
        tuesday: 1,
        wednesday: 1,
        thursday: 1,
        friday: 1,
        saturday: 1,
        sunday: 1,
        start_date: 20000101,
        end_date: 20991231,
    });

    for line in 0..GRID {
        for (direction, prefix) in [("H", "h"), ("V", "v")] {
            let route_id = format!("{direction}{line}");
            data.routes.push(GtfsRoute {
                route_id: route_id.clone(),
                route_short_name: Some(route_id.clone()),
                route_long_name: None,
                route_color: Some("0055AA".into()),
            });

            let stops: Vec<String> = (0..GRID)
                .map(|i| {
                    let (row, col) = if direction == "H" { (line, i) } else { (i, line) };
                    format!("{prefix}_{row}_{col}")
                })
                .collect();
            if direction == "H" {
                stops.iter().enumerate().for_each(|(col, id)| {
                    data.stops.push(platform(id.clone(), format!("S_{line}_{col}")));
                    data.stops.push(platform(
                        format!("v_{line}_{col}"),
                        format!("S_{line}_{col}"),
                    ));
                });
            }

            let mut departure = 5 * 3600;
            let mut trip = 0;
            while departure < 23 * 3600 {
                let trip_id = format!("{route_id}_{trip}");
                data.trips.push(GtfsTrip {
                    route_id: route_id.clone(),
                    service_id: "ALL".into(),
                    trip_id: trip_id.clone(),
                    shape_id: None,
                });
                stops.iter().enumerate().for_each(|(i, stop_id)| {
                    let time = Time::from_seconds(departure + i as u32 * HOP).to_hms_string();
                    data.stop_times.push(GtfsStopTime {
                        trip_id: trip_id.clone(),
                        arrival_time: time.clone(),
                        departure_time: time,
                        stop_id: stop_id.clone(),
                        stop_sequence: i as u32 + 1,
                    });
                });
                departure += HEADWAY;
                trip += 1;
            }
        }
    }
    data
}

fn solve(repository: &Repository, from: &str, to: &str, date: ServiceDate) {
    let _ = black_box(
        repository
            .router(from, to)
            .departure_at(Time::from_seconds(28800))
            .on_date(date)
            .solve(),
    );
}

fn criterion_benchmark(c: &mut Criterion) {
    let date = ServiceDate::from_ymd(2024, 3, 15).unwrap_or_else(ServiceDate::today);

    let mut group = c.benchmark_group("Build");
    group.sample_size(10);
    group.bench_function("Grid graph build", |b| {
        b.iter_batched(
            grid_network,
            |data| black_box(Repository::new().with_data(data)),
            BatchSize::LargeInput,
        )
    });
    group.finish();

    let repository = Repository::new().with_data(grid_network());
    let far_corner = format!("h_{}_{}", GRID - 1, GRID - 1);

    let mut group = c.benchmark_group("Routing");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));

    group.bench_function("Short route solve", |b| {
        b.iter(|| solve(&repository, "h_0_0", "h_0_5", date))
    });

    group.bench_function("Long route solve", |b| {
        b.iter(|| solve(&repository, "h_0_0", &far_corner, date))
    });

    group.finish();

    // A real feed can be benchmarked with GTFS_DATA_PATH, BENCH_FROM and BENCH_TO
    let (Ok(path), Ok(from), Ok(to)) = (
        env::var("GTFS_DATA_PATH"),
        env::var("BENCH_FROM"),
        env::var("BENCH_TO"),
    ) else {
        return;
    };
    let repository = match Repository::new().load_gtfs(Gtfs::new().from_path(path)) {
        Ok(repository) => repository,
        Err(err) => {
            println!("Failed to load GTFS_DATA_PATH: {err}");
            return;
        }
    };
    let mut group = c.benchmark_group("Feed");
    group.measurement_time(Duration::from_secs(30));
    group.bench_function("Feed route solve", |b| {
        b.iter(|| solve(&repository, &from, &to, date))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
