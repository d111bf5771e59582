//! Interactive menu loops
//!
//! Thin I/O glue over the engines: prompting, displaying, and looping. All
//! business rules live in [`AccountEngine`] and [`AdminEngine`]; refusals
//! come back as error values and are printed, never acted on here.

use crate::core::{AccountEngine, AccountStore, AdminEngine};
use crate::types::{Account, AccountNumber};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::str::FromStr;

/// Journal lines shown by the mini statement
const MINI_STATEMENT_LINES: usize = 5;

/// Run the top-level menu loop until the operator exits
pub fn run<S: AccountStore>(
    mut engine: AccountEngine<S>,
    mut admin: AdminEngine<S>,
) -> io::Result<()> {
    println!("ATM System");
    loop {
        println!("\n1. User Login\n2. Admin\n3. Exit");
        match prompt("Choose: ")?.as_str() {
            "1" => user_session(&mut engine)?,
            "2" => admin_session(&mut admin)?,
            "3" => {
                println!("Bye!");
                return Ok(());
            }
            _ => println!("Invalid choice."),
        }
    }
}

/// Read one trimmed line from stdin after printing a prompt
///
/// A closed input stream surfaces as `UnexpectedEof` so the menu loops
/// terminate instead of spinning on empty reads.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a value parseable as `T`, reporting bad input as `None`
fn prompt_parsed<T: FromStr>(label: &str) -> io::Result<Option<T>> {
    let line = prompt(label)?;
    match line.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Invalid input.");
            Ok(None)
        }
    }
}

fn user_session<S: AccountStore>(engine: &mut AccountEngine<S>) -> io::Result<()> {
    let Some(account_number) = prompt_parsed::<AccountNumber>("\nEnter Account Number: ")? else {
        return Ok(());
    };
    let pin = prompt("Enter PIN: ")?;

    match engine.login(account_number, &pin) {
        Ok(account) => {
            println!(
                "\nLogin successful! Welcome, {} (A/C {})",
                account.name, account.account_number
            );
            atm_menu(engine, account)
        }
        Err(e) => {
            println!("{e}");
            Ok(())
        }
    }
}

fn atm_menu<S: AccountStore>(
    engine: &mut AccountEngine<S>,
    mut account: Account,
) -> io::Result<()> {
    loop {
        println!("\n--- ATM Menu ---");
        println!("1. Balance Inquiry");
        println!("2. Deposit");
        println!("3. Withdraw");
        println!("4. Change PIN");
        println!("5. Transfer Funds");
        println!("6. Mini Statement (last {MINI_STATEMENT_LINES})");
        println!("7. Exit");
        match prompt("Enter choice: ")?.as_str() {
            "1" => println!("Current Balance: {:.2}", account.balance),
            "2" => deposit(engine, &mut account)?,
            "3" => withdraw(engine, &mut account)?,
            "4" => change_pin(engine, &mut account)?,
            "5" => transfer(engine, &mut account)?,
            "6" => mini_statement(engine, &account),
            "7" => {
                println!("Thank you for using the ATM.");
                return Ok(());
            }
            _ => println!("Invalid choice."),
        }
    }
}

fn deposit<S: AccountStore>(
    engine: &mut AccountEngine<S>,
    account: &mut Account,
) -> io::Result<()> {
    let Some(amount) = prompt_parsed::<Decimal>("Enter deposit amount: ")? else {
        return Ok(());
    };
    match engine.deposit(account, amount) {
        Ok(updated) => {
            println!("Deposit successful. New Balance: {:.2}", updated.balance);
            *account = updated;
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn withdraw<S: AccountStore>(
    engine: &mut AccountEngine<S>,
    account: &mut Account,
) -> io::Result<()> {
    let Some(amount) = prompt_parsed::<Decimal>("Enter withdrawal amount: ")? else {
        return Ok(());
    };
    match engine.withdraw(account, amount) {
        Ok(updated) => {
            println!("Withdrawal successful. New Balance: {:.2}", updated.balance);
            *account = updated;
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn change_pin<S: AccountStore>(
    engine: &mut AccountEngine<S>,
    account: &mut Account,
) -> io::Result<()> {
    let old_pin = prompt("Enter current PIN: ")?;
    let new_pin = prompt("Enter new PIN: ")?;
    let confirm_pin = prompt("Confirm new PIN: ")?;
    match engine.change_pin(account, &old_pin, &new_pin, &confirm_pin) {
        Ok(updated) => {
            println!("PIN changed successfully.");
            *account = updated;
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn transfer<S: AccountStore>(
    engine: &mut AccountEngine<S>,
    account: &mut Account,
) -> io::Result<()> {
    let Some(target) = prompt_parsed::<AccountNumber>("Enter target Account Number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_parsed::<Decimal>("Enter amount to transfer: ")? else {
        return Ok(());
    };
    match engine.transfer(account, target, amount) {
        Ok((updated_sender, _)) => {
            println!(
                "Transferred {amount:.2} to A/C {target}. New Balance: {:.2}",
                updated_sender.balance
            );
            *account = updated_sender;
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn mini_statement<S: AccountStore>(engine: &AccountEngine<S>, account: &Account) {
    match engine.mini_statement(account.account_number, MINI_STATEMENT_LINES) {
        Ok(lines) if lines.is_empty() => println!("No transactions yet."),
        Ok(lines) => {
            println!("\n--- Last {} transactions ---", lines.len());
            for line in &lines {
                println!("{line}");
            }
            println!("---------------------------");
        }
        Err(e) => println!("{e}"),
    }
}

fn admin_session<S: AccountStore>(admin: &mut AdminEngine<S>) -> io::Result<()> {
    let password = prompt("\n--- Admin Login ---\nPassword: ")?;
    if !admin.authenticate(&password) {
        println!("Wrong admin password.");
        return Ok(());
    }
    println!("Admin authenticated.");

    loop {
        println!("\n--- Admin Menu ---");
        println!("1. Create Account");
        println!("2. List Accounts");
        println!("3. Unlock Account");
        println!("4. Reset PIN");
        println!("5. Exit Admin");
        match prompt("Enter choice: ")?.as_str() {
            "1" => create_account(admin)?,
            "2" => list_accounts(admin),
            "3" => unlock_account(admin)?,
            "4" => reset_pin(admin)?,
            "5" => return Ok(()),
            _ => println!("Invalid choice."),
        }
    }
}

fn create_account<S: AccountStore>(admin: &mut AdminEngine<S>) -> io::Result<()> {
    println!("\n--- Create Account ---");
    let Some(account_number) = prompt_parsed::<AccountNumber>("Enter new Account Number: ")?
    else {
        return Ok(());
    };
    let name = prompt("Enter name: ")?;
    let pin = prompt("Enter initial PIN (min 4): ")?;
    let Some(initial_balance) = prompt_parsed::<Decimal>("Enter initial balance: ")? else {
        return Ok(());
    };

    match admin.create_account(account_number, &name, &pin, initial_balance) {
        Ok(account) => println!(
            "Account created: {} ({}) with balance {:.2}",
            account.account_number, account.name, account.balance
        ),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn list_accounts<S: AccountStore>(admin: &AdminEngine<S>) {
    match admin.list_accounts() {
        Ok(accounts) if accounts.is_empty() => println!("(none)"),
        Ok(accounts) => {
            println!("\n--- All Accounts ---");
            for account in &accounts {
                println!(
                    "A/C {:<6} | {:<20} | Bal: {:>10.2} | Locked: {} | Attempts: {}",
                    account.account_number,
                    account.name,
                    account.balance,
                    account.locked,
                    account.failed_attempts
                );
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn unlock_account<S: AccountStore>(admin: &mut AdminEngine<S>) -> io::Result<()> {
    let Some(account_number) = prompt_parsed::<AccountNumber>("Enter account to unlock: ")? else {
        return Ok(());
    };
    match admin.unlock(account_number) {
        Ok(account) => println!("Account {} unlocked.", account.account_number),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn reset_pin<S: AccountStore>(admin: &mut AdminEngine<S>) -> io::Result<()> {
    let Some(account_number) = prompt_parsed::<AccountNumber>("Enter account to reset PIN: ")?
    else {
        return Ok(());
    };
    let new_pin = prompt("Enter new PIN (min 4): ")?;
    match admin.reset_pin(account_number, &new_pin) {
        Ok(account) => println!("PIN reset for A/C {}.", account.account_number),
        Err(e) => println!("{e}"),
    }
    Ok(())
}
