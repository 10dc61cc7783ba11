//! Interactive limit order book CLI.
//!
//! A REPL for experimenting with the order book.
//!
//! Usage:
//!   cargo run --bin lob -- [--config book.toml] [--demo]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use pricetime::{
    BookConfig, BookError, Order, OrderBook, OrderId, OrderModify, OrderType, Price, Side, Trade,
};

#[derive(Parser)]
#[command(name = "lob")]
#[command(about = "Price/time priority limit order book")]
#[command(version)]
struct Cli {
    /// Path to a book config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the scripted walkthrough instead of the REPL
    #[arg(long)]
    demo: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match BookConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                process::exit(1);
            }
        },
        None => BookConfig::default(),
    };
    let mut book = OrderBook::with_config(config);

    let result = if cli.demo {
        demo(&mut book)
    } else {
        repl(&mut book).map_err(|e| format!("I/O error: {e}"))
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Add, cancel, match, then a fill-and-kill that sweeps the resting bid.
fn demo(book: &mut OrderBook) -> Result<(), String> {
    let gtc = |id, side, price, qty| {
        Order::new(OrderType::GoodTillCancel, OrderId(id), side, Price(price), qty)
    };
    let run = |book: &mut OrderBook, order: Order| -> Result<Vec<Trade>, String> {
        book.add_order(order).map_err(|e: BookError| e.to_string())
    };

    run(book, gtc(1, Side::Buy, 100_00, 10))?;
    println!("Order book size after adding order: {}", book.size());

    book.cancel_order(OrderId(1));
    println!("Order book size after canceling order: {}", book.size());

    run(book, gtc(2, Side::Buy, 100_00, 10))?;
    let trades = run(book, gtc(3, Side::Sell, 100_00, 5))?;
    print_trades(&trades);
    println!("Order book size after matching orders: {}", book.size());

    let fak = Order::new(OrderType::FillAndKill, OrderId(4), Side::Sell, Price(99_00), 20);
    let trades = run(book, fak)?;
    print_trades(&trades);
    println!("Number of trades from fill-and-kill order: {}", trades.len());
    println!("Final order book size: {}", book.size());
    Ok(())
}

fn repl(book: &mut OrderBook) -> io::Result<()> {
    println!("Limit Order Book CLI v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("lob> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("book" | "b") => print_book(book),
            Some("size") => println!("{} resting orders", book.size()),
            Some("buy") => handle_order(book, Side::Buy, &parts[1..]),
            Some("sell") => handle_order(book, Side::Sell, &parts[1..]),
            Some("modify" | "m") => handle_modify(book, &parts[1..]),
            Some("cancel" | "c") => handle_cancel(book, &parts[1..]),
            Some("status" | "s") => handle_status(book, &parts[1..]),
            Some(cmd) => println!("Unknown command: '{cmd}'. Type 'help' for commands."),
            None => {}
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_help() {
    println!(
        r#"
Commands:
  buy <id> <price> <qty> [gtc|fak|fok|gfd]    Submit buy order (default: GTC)
  sell <id> <price> <qty> [gtc|fak|fok|gfd]   Submit sell order (default: GTC)
  modify <id> <buy|sell> <price> <qty>        Replace a resting order
  cancel <id>                                 Cancel a resting order
  status <id>                                 Show a resting order
  book                                        Show depth
  size                                        Count resting orders
  help                                        Show this help
  quit                                        Exit

Examples:
  buy 1 100.50 100              Buy 100 @ $100.50 GTC as order #1
  sell 2 100.00 50 fak          Sell 50 @ $100.00 fill-and-kill
  modify 1 buy 100.25 80        Move order #1 (loses time priority)

Prices are in dollars (e.g., 100.50 = $100.50)
"#
    );
}

fn print_book(book: &OrderBook) {
    let snap = book.depth(10);

    println!();
    println!("            ORDER BOOK");
    println!("  ──────────────────────────────");

    if snap.asks.is_empty() && snap.bids.is_empty() {
        println!("  (empty)");
        println!();
        return;
    }

    // Asks (reversed - highest at top)
    for level in snap.asks.iter().rev() {
        println!(
            "  ASK {:>10}  {:>6}  ({} orders)",
            level.price.to_string(),
            level.quantity,
            level.order_count
        );
    }

    match snap.spread() {
        Some(spread) => println!("  ─────── spread: ${:.2} ───────", spread as f64 / 100.0),
        None => println!("  ─────── (no spread) ───────"),
    }

    for level in &snap.bids {
        println!(
            "  BID {:>10}  {:>6}  ({} orders)",
            level.price.to_string(),
            level.quantity,
            level.order_count
        );
    }

    println!();
}

fn print_trades(trades: &[Trade]) {
    for trade in trades {
        println!("  Trade: {trade}");
    }
}

fn handle_order(book: &mut OrderBook, side: Side, args: &[&str]) {
    if args.len() < 3 {
        println!(
            "Usage: {} <id> <price> <qty> [gtc|fak|fok|gfd]",
            side.to_string().to_lowercase()
        );
        return;
    }

    let Some(id) = parse_id(args[0]) else {
        return;
    };
    let Some(price) = parse_price(args[1]) else {
        println!("Invalid price: '{}'", args[1]);
        return;
    };
    let Some(qty) = parse_qty(args[2]) else {
        return;
    };
    let kind = match args.get(3).map(|s| s.parse::<OrderType>()) {
        None => OrderType::GoodTillCancel,
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            println!("{e}. Use gtc, fak, fok or gfd.");
            return;
        }
    };

    println!("Order {id}: {side} {qty} @ {price} {kind}");
    let result = book.add_order(Order::new(kind, id, side, price, qty));
    report(book, result);
}

fn handle_modify(book: &mut OrderBook, args: &[&str]) {
    if args.len() < 4 {
        println!("Usage: modify <id> <buy|sell> <price> <qty>");
        return;
    }

    let Some(id) = parse_id(args[0]) else {
        return;
    };
    let side = match args[1].parse::<Side>() {
        Ok(side) => side,
        Err(e) => {
            println!("{e}. Use buy or sell.");
            return;
        }
    };
    let Some(price) = parse_price(args[2]) else {
        println!("Invalid price: '{}'", args[2]);
        return;
    };
    let Some(qty) = parse_qty(args[3]) else {
        return;
    };

    if !book.contains(id) {
        println!("Order {id} not found");
        return;
    }
    let result = book.modify_order(OrderModify::new(id, side, price, qty));
    report(book, result);
}

fn handle_cancel(book: &mut OrderBook, args: &[&str]) {
    let Some(id) = args.first().and_then(|s| parse_id(s)) else {
        println!("Usage: cancel <id>");
        return;
    };

    match book.order(id).map(Order::remaining_quantity) {
        Some(remaining) => {
            book.cancel_order(id);
            println!("Cancelled order {id} ({remaining} remaining)");
        }
        None => println!("Order {id} not found"),
    }
}

fn handle_status(book: &OrderBook, args: &[&str]) {
    let Some(id) = args.first().and_then(|s| parse_id(s)) else {
        println!("Usage: status <id>");
        return;
    };

    match book.order(id) {
        Some(order) => {
            println!("Order {id}:");
            println!("  Side:      {}", order.side());
            println!("  Price:     {}", order.price());
            println!(
                "  Quantity:  {} (filled: {}, remaining: {})",
                order.initial_quantity(),
                order.filled_quantity(),
                order.remaining_quantity()
            );
            println!("  Type:      {}", order.order_type());
        }
        None => println!("Order {id} not found"),
    }
}

fn report(book: &OrderBook, result: Result<Vec<Trade>, BookError>) {
    match result {
        Ok(trades) => {
            print_trades(&trades);
            println!("  Resting orders: {}", book.size());
        }
        Err(e) => println!("  Rejected: {e}"),
    }
}

fn parse_id(s: &str) -> Option<OrderId> {
    match s.parse() {
        Ok(id) => Some(OrderId(id)),
        Err(_) => {
            println!("Invalid order ID: '{s}'");
            None
        }
    }
}

fn parse_qty(s: &str) -> Option<u64> {
    match s.parse() {
        Ok(q) if q > 0 => Some(q),
        _ => {
            println!("Invalid quantity: '{s}'");
            None
        }
    }
}

fn parse_price(s: &str) -> Option<Price> {
    // Parse as float, convert to cents
    let f: f64 = s.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    Some(Price((f * 100.0).round() as i64))
}
