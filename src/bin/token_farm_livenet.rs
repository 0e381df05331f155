//! Livenet deploy and demo binary for the Token Farm.
//!
//! Run with:
//! - Deploy only:        FARM_LIVENET_MODE=deploy cargo run --bin token_farm_livenet --features=livenet
//! - Deploy + demo:      FARM_LIVENET_MODE=deploy_and_demo cargo run --bin token_farm_livenet --features=livenet
//! - Demo on existing:   FARM_LIVENET_MODE=demo FARM_EXISTING_DAPP=... FARM_EXISTING_FARM=... cargo run ...
//! - Query position:     FARM_LIVENET_MODE=query FARM_EXISTING_DAPP=... FARM_EXISTING_FARM=... cargo run ...
//!
//! Required environment variables (Odra livenet):
//! - ODRA_CASPER_LIVENET_SECRET_KEY_PATH
//! - ODRA_CASPER_LIVENET_NODE_ADDRESS        (base URL; Odra appends "/rpc")
//! - ODRA_CASPER_LIVENET_EVENTS_URL
//! - ODRA_CASPER_LIVENET_CHAIN_NAME
//!
//! Optional:
//! - ODRA_CASPER_LIVENET_DEPLOY_GAS          (motes, per contract deploy)
//! - ODRA_CASPER_LIVENET_CALL_GAS            (motes, per entry point call)
//! - FARM_EXISTING_DAPP / FARM_EXISTING_FARM (64-hex or formatted "hash-..."/"contract-package-...")
//! - FARM_WETH_TOKEN / FARM_FAU_TOKEN        (stakeable tokens; a MockToken is deployed when unset)
//! - FARM_ETH_USD_FEED / FARM_DAI_USD_FEED   (price feeds; a MockPriceFeed is deployed when unset)
//! - FARM_KEPT_BALANCE_DAPP                  (DAPP kept by the deployer, default: 100)
//! - FARM_DEMO_STAKE_DAPP                    (DAPP staked by the demo, default: 1)

use odra::host::{Deployer, HostEnv, HostRef, HostRefLoader, NoArgs};
use odra::prelude::*;
use odra::casper_types::U256;

use token_farm_casper::price_feed::{MockPriceFeed, MockPriceFeedInitArgs};
use token_farm_casper::token_farm::{TokenFarm, TokenFarmHostRef, TokenFarmInitArgs};
use token_farm_casper::tokens::{DappToken, DappTokenHostRef, MockToken, MockTokenInitArgs};

const MOTES_PER_CSPR: u64 = 1_000_000_000;
const WAD: u128 = 1_000_000_000_000_000_000;

/// Mock feed answer used on networks without a real feed: 2000 with 18 decimals
const MOCK_FEED_DECIMALS: u8 = 18;
const MOCK_FEED_ANSWER: u128 = 2_000 * WAD;

const DEFAULT_DEPLOY_GAS_MOTES: u64 = 450_000_000_000; // 450 CSPR
const DEFAULT_CALL_GAS_MOTES: u64 = 50_000_000_000; // 50 CSPR

fn main() {
    println!("============================================");
    println!("  Token Farm — Livenet");
    println!("============================================\n");

    let env = odra_casper_livenet_env::env();

    let mode = std::env::var("FARM_LIVENET_MODE").unwrap_or_else(|_| "deploy".to_string());
    let should_deploy = mode == "deploy" || mode == "deploy_and_demo";
    let should_demo = mode == "demo" || mode == "deploy_and_demo";
    let should_query = mode == "query";

    let deploy_gas = read_u64_env("ODRA_CASPER_LIVENET_DEPLOY_GAS", DEFAULT_DEPLOY_GAS_MOTES);
    let call_gas = read_u64_env("ODRA_CASPER_LIVENET_CALL_GAS", DEFAULT_CALL_GAS_MOTES);
    let kept_balance = U256::from(read_u64_env("FARM_KEPT_BALANCE_DAPP", 100)) * U256::from(WAD);
    let stake_amount = U256::from(read_u64_env("FARM_DEMO_STAKE_DAPP", 1)) * U256::from(WAD);

    println!("[INFO] Mode: {}", mode);
    println!("[INFO] Caller: {:?}", env.caller());
    println!(
        "[INFO] Gas (motes): deploy={} ({} CSPR), calls={} ({} CSPR)",
        deploy_gas,
        deploy_gas / MOTES_PER_CSPR,
        call_gas,
        call_gas / MOTES_PER_CSPR
    );
    println!();

    // ==========================================
    // Step 1: Deploy (or reuse) DAPP
    // ==========================================
    let mut dapp = if should_deploy {
        println!("[STEP 1] Deploying DAPP reward token...");
        env.set_gas(deploy_gas);
        let dapp = DappToken::deploy(&env, NoArgs);
        println!("[OK] DAPP deployed at: {:?}", dapp.address());
        println!("     Total supply: {}", dapp.total_supply());
        println!();
        dapp
    } else {
        println!("[STEP 1] Reusing existing DAPP token...");
        let addr = required_address("FARM_EXISTING_DAPP", &mode);
        println!("[OK] DAPP: {:?}", addr);
        println!();
        DappToken::load(&env, addr)
    };
    let dapp_addr = dapp.address();

    // ==========================================
    // Step 2: Deploy (or reuse) the farm
    // ==========================================
    let mut farm = if should_deploy {
        println!("[STEP 2] Deploying TokenFarm...");
        env.set_gas(deploy_gas);
        let farm = TokenFarm::deploy(&env, TokenFarmInitArgs { reward_token: dapp_addr });
        println!("[OK] TokenFarm deployed at: {:?}", farm.address());
        println!("     Reward token: {:?}", farm.reward_token());
        println!();
        farm
    } else {
        println!("[STEP 2] Reusing existing TokenFarm...");
        let addr = required_address("FARM_EXISTING_FARM", &mode);
        println!("[OK] TokenFarm: {:?}", addr);
        println!();
        TokenFarm::load(&env, addr)
    };
    let farm_addr = farm.address();

    // ==========================================
    // Step 3: Fund the farm and register tokens
    // ==========================================
    if should_deploy {
        println!("[STEP 3] Funding TokenFarm with DAPP...");
        let supply = dapp.total_supply();
        if supply <= kept_balance {
            panic!("[FATAL] kept balance {} exceeds DAPP supply {}", kept_balance, supply);
        }
        env.set_gas(call_gas);
        dapp.transfer(farm_addr, supply - kept_balance);
        println!("[OK] Farm DAPP balance: {}", dapp.balance_of(farm_addr));
        println!();

        println!("[STEP 4] Registering allowed tokens and price feeds...");
        env.set_gas(call_gas);
        let dai_usd_feed = address_or_mock_feed(&env, "FARM_DAI_USD_FEED", deploy_gas);
        let eth_usd_feed = address_or_mock_feed(&env, "FARM_ETH_USD_FEED", deploy_gas);
        let fau_token = address_or_mock_token(&env, "FARM_FAU_TOKEN", "FAU", deploy_gas);
        let weth_token = address_or_mock_token(&env, "FARM_WETH_TOKEN", "WETH", deploy_gas);

        let allowed = [
            ("DAPP", dapp_addr, dai_usd_feed),
            ("FAU", fau_token, dai_usd_feed),
            ("WETH", weth_token, eth_usd_feed),
        ];
        for (label, token, feed) in allowed {
            env.set_gas(call_gas);
            if farm.is_allowed(token) {
                println!("[WARN] {} already allowed, skipping whitelist add.", label);
            } else {
                farm.add_allowed_token(token);
            }
            env.set_gas(call_gas);
            farm.set_price_feed(token, feed);
            println!("[OK] {} {:?} -> feed {:?}", label, token, feed);
        }
        println!("     Allowed tokens: {}", farm.allowed_token_count());
        println!();
    }

    // ==========================================
    // Demo: stake -> value -> issue rewards
    // ==========================================
    if should_demo {
        let caller = env.caller();

        println!("[DEMO 1] Staking {} DAPP wei...", stake_amount);
        env.set_gas(call_gas);
        dapp.approve(farm_addr, stake_amount);
        env.set_gas(call_gas);
        farm.stake(dapp_addr, stake_amount);
        println!("[OK] Stake complete.");
        print_position_info(&farm, caller, &dapp);

        println!("[DEMO 2] Issuing rewards...");
        env.set_gas(call_gas);
        farm.issue_rewards();
        println!("[OK] Rewards issued.");
        print_position_info(&farm, caller, &dapp);
    }

    // ==========================================
    // Query mode: Output position as JSON
    // ==========================================
    if should_query {
        let farm = TokenFarmHostRef::new(farm_addr, env.clone());
        let user = env.caller();

        println!(
            "FARM_POSITION_JSON={{\"user\":\"{:?}\",\"staked_dapp\":\"{}\",\"unique_tokens\":{},\"total_value\":\"{}\",\"dapp_balance\":\"{}\"}}",
            user,
            farm.balance_of(user, dapp_addr),
            farm.unique_token_count(user),
            farm.total_value(user),
            dapp.balance_of(user)
        );
        return;
    }

    output_deploy_json(dapp_addr, farm_addr);
}

fn print_position_info(farm: &TokenFarmHostRef, user: Address, dapp: &DappTokenHostRef) {
    println!("     staked DAPP: {}", farm.balance_of(user, dapp.address()));
    println!("     unique tokens: {}", farm.unique_token_count(user));
    println!("     total value: {}", farm.total_value(user));
    println!("     stakers: {}", farm.staker_count());
    println!("     user DAPP balance: {}", dapp.balance_of(user));
    println!("     farm DAPP balance: {}", dapp.balance_of(farm.address()));
    println!();
}

fn address_or_mock_feed(env: &HostEnv, var: &str, deploy_gas: u64) -> Address {
    if let Ok(raw) = std::env::var(var) {
        return parse_contract_address(&raw);
    }
    println!("     {} not set, deploying MockPriceFeed...", var);
    env.set_gas(deploy_gas);
    let feed = MockPriceFeed::deploy(
        env,
        MockPriceFeedInitArgs {
            decimals: MOCK_FEED_DECIMALS,
            initial_answer: U256::from(MOCK_FEED_ANSWER),
        },
    );
    feed.address()
}

fn address_or_mock_token(env: &HostEnv, var: &str, symbol: &str, deploy_gas: u64) -> Address {
    if let Ok(raw) = std::env::var(var) {
        return parse_contract_address(&raw);
    }
    println!("     {} not set, deploying MockToken {}...", var, symbol);
    env.set_gas(deploy_gas);
    let token = MockToken::deploy(
        env,
        MockTokenInitArgs {
            symbol: symbol.to_string(),
            name: format!("Mock {}", symbol),
        },
    );
    token.address()
}

fn required_address(var: &str, mode: &str) -> Address {
    let raw = std::env::var(var)
        .unwrap_or_else(|_| panic!("{} must be set for mode={}", var, mode));
    parse_contract_address(&raw)
}

fn read_u64_env(name: &str, default_value: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => {
            let cleaned = raw.trim().replace('_', "");
            cleaned.parse::<u64>().unwrap_or(default_value)
        }
        Err(_) => default_value,
    }
}

fn output_deploy_json(dapp_addr: Address, farm_addr: Address) {
    let chain_name =
        std::env::var("ODRA_CASPER_LIVENET_CHAIN_NAME").unwrap_or_else(|_| "casper-test".to_string());

    println!(
        r#"FARM_DEPLOY_JSON={{"chain_name":"{}","dapp_contract_hash":"{}","farm_contract_hash":"{}","deployed_at":"{}"}}"#,
        chain_name,
        address_hex(&dapp_addr),
        address_hex(&farm_addr),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
}

fn address_hex(addr: &Address) -> String {
    match addr.as_contract_package_hash() {
        Some(hash) => hash.value().iter().map(|b| format!("{:02x}", b)).collect(),
        None => format!("{:?}", addr),
    }
}

fn parse_contract_address(raw: &str) -> Address {
    use odra::casper_types::account::AccountHash;
    use odra::casper_types::contracts::ContractPackageHash;

    let trimmed = raw.trim();
    if let Some(hex) = trimmed.strip_prefix("account-hash-") {
        return Address::Account(AccountHash::new(decode_hex_32(hex)));
    }
    let package_hex = ["contract-package-", "package-", "hash-"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    Address::Contract(ContractPackageHash::new(decode_hex_32(package_hex)))
}

fn decode_hex_32(s: &str) -> [u8; 32] {
    if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        panic!("Invalid address hash (expected 64 hex): {}", s);
    }
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
            .unwrap_or_else(|_| panic!("Invalid hex in address: {}", s));
    }
    out
}
