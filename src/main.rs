// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! proxyfetch CLI
//!
//! Issue a single HEAD/GET/POST request and print the negotiated response.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use proxyfetch::{BodyVariant, HttpClient, HttpClientConfig, RequestOptions, Response};

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");

    // Initialize logging
    let directive = if verbose { "proxyfetch=debug" } else { "proxyfetch=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("static directive")),
        )
        .init();

    if args.is_empty() {
        print_usage();
        return ExitCode::from(1);
    }

    let command = args[0].as_str();
    match command {
        "head" | "get" | "post" => {}
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("proxyfetch {}", proxyfetch::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    }

    let (url, options) = match parse_request(&args[1..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Usage: proxyfetch {} <url> [OPTIONS]", command);
            return ExitCode::from(1);
        }
    };

    let client = match HttpClient::with_config(HttpClientConfig::default().verbose(verbose)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    let result = match command {
        "head" => client.head(&url, options).await,
        "get" => client.get(&url, options).await,
        _ => client.post(&url, options).await,
    };

    match result {
        Ok(response) => {
            print_response(&response);
            if response.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed (status {}): {}", e.status(), e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"proxyfetch - HTTP requests through any proxy

USAGE:
    proxyfetch <COMMAND> <url> [OPTIONS]

COMMANDS:
    head <url>      Send a HEAD request
    get <url>       Send a GET request
    post <url>      Send a POST request (requires a body option)
    help            Show this help message
    version         Show version information

OPTIONS:
    --proxy <URL>        socks4://, socks5://, http:// or https:// proxy
    --token <TOKEN>      Bearer token
    --cookie <k=v>       Cookie (repeatable)
    --header <k:v>       Header (repeatable)
    --query <k=v>        Query parameter (repeatable)
    --timeout <MS>       Timeout in milliseconds
    --no-redirect        Do not follow redirects
    --json <DATA>        JSON body
    --form <DATA>        Form body
    --text <DATA>        Plain text body
    --xml <DATA>         XML body
    --verbose            Debug logging

EXAMPLES:
    proxyfetch get https://example.com --proxy socks5://127.0.0.1:9050
    proxyfetch post https://httpbin.org/post --json '{{"a":1}}'
"#
    );
}

fn parse_request(args: &[String]) -> anyhow::Result<(String, RequestOptions)> {
    let mut iter = args.iter();
    let url = iter.next().ok_or_else(|| anyhow!("missing <url>"))?.clone();
    let mut options = RequestOptions::new();

    while let Some(flag) = iter.next() {
        if flag == "--verbose" {
            continue;
        }
        if flag == "--no-redirect" {
            options = options.redirect(proxyfetch::RedirectPolicy::None);
            continue;
        }

        let value = iter
            .next()
            .with_context(|| format!("{} requires a value", flag))?;
        options = match flag.as_str() {
            "--proxy" => options.proxy(value),
            "--token" => options.token(value),
            "--cookie" => {
                let (k, v) = split_pair(value, '=')?;
                options.cookie(k, v)
            }
            "--header" => {
                let (k, v) = split_pair(value, ':')?;
                options.header(k, v)
            }
            "--query" => {
                let (k, v) = split_pair(value, '=')?;
                options.query(k, v)
            }
            "--timeout" => {
                let ms: u64 = value.parse().context("--timeout expects milliseconds")?;
                options.timeout(Duration::from_millis(ms))
            }
            "--json" => options.body(BodyVariant::json(value.clone())),
            "--form" => options.body(BodyVariant::form(value.clone())),
            "--text" => options.body(BodyVariant::text(value.clone())),
            "--xml" => options.body(BodyVariant::xml(value.clone())),
            other => bail!("unknown option {}", other),
        };
    }

    Ok((url, options))
}

fn split_pair(value: &str, sep: char) -> anyhow::Result<(String, String)> {
    let (k, v) = value
        .split_once(sep)
        .with_context(|| format!("expected <name>{}<value>, got {}", sep, value))?;
    Ok((k.trim().to_string(), v.trim().to_string()))
}

fn print_response(response: &Response) {
    println!("=== Response ===");
    println!("Status: {} (ok: {})", response.status, response.ok);
    println!("URL: {}", response.url);
    println!("Content-Type: {:?}", response.content_type());
    println!("Time: {}ms", response.elapsed_ms);

    if !response.cookies.is_empty() {
        println!("\n=== Cookies ({}) ===", response.cookies.len());
        for (name, value) in &response.cookies {
            println!("  {} = {}", name, value);
        }
    }

    let supports = response.supports();
    if let Some(Ok(json)) = response.json() {
        println!("\n=== JSON ===");
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
    } else if let Some(Ok(doc)) = response.dom() {
        println!("\n=== Document ===");
        if let Some(title) = doc.title() {
            println!("Title: {}", title);
        }
        println!("Links: {}", doc.get_elements_by_tag_name("a").len());
    } else if let Some(bytes) = response.binary() {
        println!("\n=== Binary ===");
        println!("Size: {} bytes", bytes.len());
    } else if supports.text {
        if let Some(text) = response.text() {
            println!("\n=== Text ===");
            println!("{}", text);
        }
    }
}
