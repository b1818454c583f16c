//! `slipway tools` command
//!
//! Probes the toolchain for a target platform and reports what was
//! found. Missing tools are reported, not fatal: downstream steps may
//! have alternatives, and the caller decides what is required.

use anyhow::Result;

use slipway::toolchain::{detect_build, ndk, DiscoverOptions, Toolchain};
use slipway::util::config::{self, ToolchainConfig};
use slipway::util::envvars::EnvSnapshot;
use slipway::Triple;

use crate::cli::ToolsArgs;

pub fn execute(args: ToolsArgs) -> Result<()> {
    let env = EnvSnapshot::from_process();
    let build = detect_build();
    let host = match &args.host {
        Some(text) => Triple::parse(text),
        None => build.clone(),
    };

    let search_paths = if args.ndk {
        let root = ndk::ndk_root(&env)?;
        Some(ndk::toolchain_bin_dirs(&root, &build))
    } else {
        None
    };

    let toolchain_config = config::config_dir(None, true, &env)
        .map(|dir| ToolchainConfig::load_or_default(&config::toolchain_config_path(&dir)))
        .unwrap_or_default();

    let opts = DiscoverOptions {
        host: Some(host.clone()),
        search_paths,
    };
    let toolchain = Toolchain::discover(&opts, &toolchain_config, &env);

    if args.export {
        toolchain.export_env();
    }

    if args.json {
        print_json(&build, &host, &toolchain)
    } else {
        print_report(&build, &host, &toolchain);
        Ok(())
    }
}

fn print_report(build: &Triple, host: &Triple, toolchain: &Toolchain) {
    println!("build: {}", build);
    println!("host:  {} (native: {})", host, host.to_native());
    println!();

    let tools = [
        ("cc", &toolchain.cc),
        ("cxx", &toolchain.cxx),
        ("ar", &toolchain.ar),
        ("link", &toolchain.link),
        ("driver", &toolchain.driver),
    ];
    for (name, path) in tools {
        match path {
            Some(path) => println!("  [OK] {:<6} {}", name, path.display()),
            None => println!("  [--] {:<6} not found", name),
        }
    }

    println!();
    let compiler = &toolchain.cc_identity;
    if compiler.is_unknown() {
        println!("compiler: unknown");
    } else {
        println!(
            "compiler: {} {} targeting {}",
            compiler.kind, compiler.version, compiler.target
        );
    }
    let driver = &toolchain.driver_identity;
    if driver.is_unknown() {
        println!("driver:   unknown");
    } else {
        println!("driver:   {} {}", driver.kind, driver.version);
    }
}

fn print_json(build: &Triple, host: &Triple, toolchain: &Toolchain) -> Result<()> {
    let report = serde_json::json!({
        "build": build.to_string(),
        "host": host.to_string(),
        "tools": {
            "cc": toolchain.cc,
            "cxx": toolchain.cxx,
            "ar": toolchain.ar,
            "link": toolchain.link,
            "driver": toolchain.driver,
        },
        "compiler": {
            "kind": toolchain.cc_identity.kind.as_str(),
            "version": toolchain.cc_identity.version.to_string(),
            "target": toolchain.cc_identity.target.to_string(),
        },
        "driver": {
            "kind": toolchain.driver_identity.kind.as_str(),
            "version": toolchain.driver_identity.version.to_string(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
