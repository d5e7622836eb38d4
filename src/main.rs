use clap::Parser;
use mortar::{
    graph::{DiGraph, VertexId},
    links::{LinkedList, LinkedQueue},
    seed::{Client, SeedData, Site, client_order},
    stats::SessionStats,
    tree::AvlTree,
};
use rand::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Pharmacy back-office dashboard demos
#[derive(Parser, Debug)]
#[command(name = "mortar")]
#[command(about = "Pharmacy back-office dashboard over tree, queue, list and graph", long_about = None)]
struct Args {
    /// Path to a seed JSON file (uses the bundled fixture when omitted)
    #[arg(short, long)]
    seed: Option<String>,

    /// Dashboard tab to run: all, clients, tickets, sales or routes
    #[arg(short, long, default_value = "all")]
    tab: String,

    /// Run a seeded stress workload with this many operations instead of the demos
    #[arg(long)]
    stress: Option<usize>,

    /// RNG seed for the stress workload
    #[arg(long, default_value_t = 42)]
    rng_seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardTab {
    All,
    Clients,
    Tickets,
    Sales,
    Routes,
}

impl DashboardTab {
    fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "all" => DashboardTab::All,
            "clients" => DashboardTab::Clients,
            "tickets" => DashboardTab::Tickets,
            "sales" => DashboardTab::Sales,
            "routes" => DashboardTab::Routes,
            _ => panic!("Invalid dashboard tab: {}", s),
        }
    }

    fn covers(self, other: DashboardTab) -> bool {
        self == DashboardTab::All || self == other
    }
}

fn run_clients_tab(seed: &SeedData, stats: &mut SessionStats) {
    println!("\n==========");
    println!("Client registry (balanced tree)");
    println!("==========");

    let mut registry = AvlTree::with_comparator(client_order);
    for client in &seed.clients {
        registry.insert(client.clone());
        stats.bump_mutations();
    }

    let snapshot = registry.in_order();
    stats.bump_snapshots(snapshot.len());
    println!(
        "In-order, {} clients, tree height {}:",
        registry.len(),
        registry.height()
    );
    for client in &snapshot {
        println!("  #{:<4} {}", client.id, client.name);
    }

    if let Some(first) = seed.clients.first() {
        let corrected = Client {
            id: first.id,
            name: format!("{} (updated)", first.name),
        };
        let displaced = registry.insert(corrected);
        stats.bump_mutations();
        println!(
            "Re-registered #{}, displaced {:?}",
            first.id,
            displaced.map(|c| c.name)
        );
    }

    let probe = Client {
        id: 4,
        name: String::new(),
    };
    stats.bump_lookups();
    match registry.search(&probe) {
        Some(found) => println!("Lookup #4 -> {}", found.name),
        None => println!("Lookup #4 -> no such client"),
    }

    if let Some(last) = snapshot.last() {
        registry.remove(last);
        stats.bump_mutations();
        let ids: Vec<u32> = registry.in_order().iter().map(|c| c.id).collect();
        stats.bump_snapshots(ids.len());
        println!(
            "Removed #{}, remaining ids {:?} (height {})",
            last.id,
            ids,
            registry.height()
        );
    }
}

fn run_tickets_tab(seed: &SeedData, stats: &mut SessionStats) {
    println!("\n==========");
    println!("Service window (FIFO queue)");
    println!("==========");

    let mut window = LinkedQueue::new();
    for ticket in &seed.tickets {
        window.enqueue(ticket.clone());
        stats.bump_mutations();
    }

    let numbers: Vec<u32> = window.to_vec().iter().map(|t| t.number).collect();
    stats.bump_snapshots(numbers.len());
    println!("Waiting: {:?}", numbers);

    if let Some(served) = window.dequeue() {
        stats.bump_mutations();
        println!("Served ticket {} for {}", served.number, served.client);
    }

    stats.bump_lookups();
    match window.peek() {
        Some(next) => println!("Next up: ticket {}", next.number),
        None => println!("Next up: window is idle"),
    }

    stats.bump_lookups();
    match window.search(|ticket| ticket.number == 103) {
        Some(found) => println!("Ticket 103 belongs to {}", found.client),
        None => println!("Ticket 103 is not waiting"),
    }

    let numbers: Vec<u32> = window.to_vec().iter().map(|t| t.number).collect();
    stats.bump_snapshots(numbers.len());
    println!("Still waiting: {:?}", numbers);
}

fn run_sales_tab(seed: &SeedData, stats: &mut SessionStats) {
    println!("\n==========");
    println!("Sales history (linked list)");
    println!("==========");

    let mut history = LinkedList::new();
    for sale in &seed.sales {
        history.prepend(sale.clone());
        stats.bump_mutations();
    }

    let snapshot = history.to_vec();
    let ids: Vec<&str> = snapshot.iter().map(|s| s.id.as_str()).collect();
    stats.bump_snapshots(ids.len());
    println!("Newest first: {:?}", ids);

    if let Some(voided) = seed.sales.get(1) {
        let dropped = history.remove(|sale| sale.id == voided.id);
        stats.bump_mutations();
        println!("Voided {} -> {}", voided.id, dropped);
    }

    stats.bump_lookups();
    match history.find(|sale| sale.total_cents >= 10_000) {
        Some(sale) => println!(
            "First sale over 100.00 on record: {} ({} cents)",
            sale.id, sale.total_cents
        ),
        None => println!("No sale over 100.00 on record"),
    }

    let remaining: Vec<String> = history.to_vec().iter().map(|s| s.id.clone()).collect();
    stats.bump_snapshots(remaining.len());
    println!("After void: {:?}", remaining);
}

fn print_routes_from(network: &DiGraph<Site>, start: VertexId, stats: &mut SessionStats) {
    for goal in network.vertices() {
        if goal == start {
            continue;
        }
        stats.bump_lookups();
        let label = network
            .payload(goal)
            .map(|site| site.code.clone())
            .unwrap_or_default();
        match network.find_path(start, goal) {
            Some(path) => {
                let codes: Vec<String> = path
                    .iter()
                    .filter_map(|&id| network.payload(id).map(|site| site.code.clone()))
                    .collect();
                println!("  -> {}: {}", label, codes.join(" -> "));
            }
            None => println!("  -> {}: unreachable", label),
        }
    }
}

fn run_routes_tab(seed: &SeedData, stats: &mut SessionStats) {
    println!("\n==========");
    println!("Delivery network (directed graph)");
    println!("==========");

    let mut network = DiGraph::new();
    for site in &seed.sites {
        network.add_vertex(site.clone());
        stats.bump_mutations();
    }
    for route in &seed.routes {
        let from = network.find_vertex(|site| site.code == route.from);
        let to = network.find_vertex(|site| site.code == route.to);
        if let (Some(from), Some(to)) = (from, to) {
            network.add_edge_with(from, to, route.distance_km, route.carrier.clone());
            stats.bump_mutations();
        }
    }
    println!(
        "{} sites, {} routes",
        network.vertex_count(),
        network.edge_count()
    );

    let first = match seed.sites.first() {
        Some(site) => site,
        None => return,
    };
    let start = match network.find_vertex(|site| site.code == first.code) {
        Some(id) => id,
        None => return,
    };

    let sweep = network.bfs(start);
    stats.bump_snapshots(sweep.len());
    let cities: Vec<&str> = sweep.iter().map(|site| site.city.as_str()).collect();
    println!("Reachable from {} (breadth-first): {:?}", first.code, cities);

    let sweep = network.dfs(start);
    stats.bump_snapshots(sweep.len());
    let codes: Vec<&str> = sweep.iter().map(|site| site.code.as_str()).collect();
    println!("Depth-first sweep: {:?}", codes);

    println!("Fewest-hop routes from {}:", first.code);
    print_routes_from(&network, start, stats);

    if let Some(hub) = seed.sites.get(1) {
        if let Some(hub_id) = network.find_vertex(|site| site.code == hub.code) {
            network.remove_vertex(hub_id);
            stats.bump_mutations();
            println!(
                "Closed site {}: {} sites, {} routes left",
                hub.code,
                network.vertex_count(),
                network.edge_count()
            );
            println!("Routes from {} after the closure:", first.code);
            print_routes_from(&network, start, stats);
        }
    }
}

fn run_stress_job(ops: usize, rng_seed: u64) {
    println!("\n==========");
    println!("Running stress workload: ops={ops}, rng_seed={rng_seed}");
    println!("==========");

    let mut rng = StdRng::seed_from_u64(rng_seed);
    let start_time = Instant::now();

    let mut registry: AvlTree<u32> = AvlTree::new();
    let id_space = (ops as u32).max(2) * 2;
    for _ in 0..ops {
        registry.insert(rng.random_range(0..id_space));
    }
    for _ in 0..ops / 2 {
        let probe = rng.random_range(0..id_space);
        registry.remove(&probe);
    }

    let bound = (1.4405 * ((registry.len() as f64) + 2.0).log2()) as i32;
    assert!(
        registry.height() <= bound,
        "tree degenerated: height {} over bound {}",
        registry.height(),
        bound
    );
    println!(
        "Tree: {} survivors, height {} (bound {})",
        registry.len(),
        registry.height(),
        bound
    );

    let mut window = LinkedQueue::new();
    for i in 0..ops {
        window.enqueue(i);
        if i % 3 == 0 {
            window.dequeue();
        }
    }
    let drained = std::iter::from_fn(|| window.dequeue()).count();
    println!("Queue: drained {drained} tickets after churn");

    let elapsed = start_time.elapsed();
    let total_ops = ops * 2 + ops / 2;
    println!(
        "Completed {} operations in {:.2}s ({:.0} ops/s)",
        total_ops,
        elapsed.as_secs_f64(),
        total_ops as f64 / elapsed.as_secs_f64()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Some(ops) = args.stress {
        run_stress_job(ops, args.rng_seed);
        return;
    }

    let tab = DashboardTab::from_string(&args.tab);

    println!("Loading seed data...");
    let seed = match &args.seed {
        Some(path) => SeedData::from_path(path),
        None => SeedData::embedded(),
    };
    println!(
        "Seed loaded: {} clients, {} tickets, {} sales, {} sites, {} routes",
        seed.clients.len(),
        seed.tickets.len(),
        seed.sales.len(),
        seed.sites.len(),
        seed.routes.len()
    );

    let mut stats = SessionStats::new();
    let start_time = Instant::now();

    if tab.covers(DashboardTab::Clients) {
        run_clients_tab(&seed, &mut stats);
    }
    if tab.covers(DashboardTab::Tickets) {
        run_tickets_tab(&seed, &mut stats);
    }
    if tab.covers(DashboardTab::Sales) {
        run_sales_tab(&seed, &mut stats);
    }
    if tab.covers(DashboardTab::Routes) {
        run_routes_tab(&seed, &mut stats);
    }

    println!("\n==========");
    stats.report();
    println!(
        "All tabs completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    println!("==========");
}
