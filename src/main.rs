use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::*;
use structopt::StructOpt;

use catalog_admin::guard::{Access, Route, MENU};
use catalog_admin::view::companies::{self, CompanyQuery, CompanySort};
use catalog_admin::view::dashboard::{describe_company, describe_product, Summary};
use catalog_admin::view::forms::{self, CompanyForm, CredentialsForm, ProductForm};
use catalog_admin::view::products::{self, CompanyNames, ProductQuery, ProductSort};
use catalog_admin::view::table::paginate;
use catalog_admin::view::{Order, PAGE_SIZE};
use catalog_admin::{guard, AuthContext, Company, Config, FileBackend, Product, Store};

#[derive(Debug, StructOpt)]
#[structopt(name = "catalog-admin", about = "Manage companies and their products")]
struct Opt {
    /// Where the JSON collections live [default: $CATALOG_ADMIN_DIR or ~/.config/catalog-admin]
    #[structopt(long)]
    data_dir: Option<String>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Log in, replacing any current session
    Login { username: String, password: String },
    /// Create an account and log in as it
    Register { username: String, password: String },
    Logout,
    /// Show who is logged in
    Whoami,
    /// Record counts and the latest additions
    Dashboard,
    Companies {
        #[structopt(subcommand)]
        cmd: CompanyCommand,
    },
    Products {
        #[structopt(subcommand)]
        cmd: ProductCommand,
    },
}

#[derive(Debug, StructOpt)]
enum CompanyCommand {
    List {
        /// Matches name, legal number, country or website
        #[structopt(long)]
        search: Option<String>,
        #[structopt(long)]
        country: Option<String>,
        /// name or legal-number
        #[structopt(long, parse(try_from_str = company_sort))]
        sort: Option<CompanySort>,
        #[structopt(long)]
        desc: bool,
        #[structopt(long, default_value = "1")]
        page: usize,
    },
    Add {
        #[structopt(long)]
        name: String,
        #[structopt(long)]
        legal_number: String,
        /// Defaults to Türkiye
        #[structopt(long)]
        country: Option<String>,
        #[structopt(long)]
        website: String,
    },
    /// Change fields, e.g. `edit <id> country=Japan website=https://x.example`
    Edit {
        id: String,
        #[structopt(required = true)]
        fields: Vec<String>,
    },
    /// Delete a company together with its products
    Delete { id: String },
}

#[derive(Debug, StructOpt)]
enum ProductCommand {
    List {
        /// Matches name or category
        #[structopt(long)]
        search: Option<String>,
        #[structopt(long)]
        category: Option<String>,
        /// name or amount
        #[structopt(long, parse(try_from_str = product_sort))]
        sort: Option<ProductSort>,
        #[structopt(long)]
        desc: bool,
        #[structopt(long, default_value = "1")]
        page: usize,
    },
    /// Categories currently in use
    Categories,
    Add {
        #[structopt(long)]
        name: String,
        #[structopt(long)]
        category: String,
        #[structopt(long)]
        amount: String,
        /// Defaults to pcs
        #[structopt(long)]
        unit: Option<String>,
        #[structopt(long)]
        company_id: String,
    },
    /// Change fields, e.g. `edit <id> amount=12 unit=kg`
    Edit {
        id: String,
        #[structopt(required = true)]
        fields: Vec<String>,
    },
    Delete { id: String },
}

impl Command {
    fn route(&self) -> Route {
        match self {
            Command::Login { .. } | Command::Register { .. } | Command::Logout => Route::Auth,
            Command::Whoami | Command::Dashboard => Route::Dashboard,
            Command::Companies { .. } => Route::Companies,
            Command::Products { .. } => Route::Products,
        }
    }
}

fn company_sort(s: &str) -> Result<CompanySort, String> {
    match s {
        "name" => Ok(CompanySort::Name),
        "legal-number" => Ok(CompanySort::LegalNumber),
        _ => Err(format!("Unknown sort column {}, expected name or legal-number", s)),
    }
}

fn product_sort(s: &str) -> Result<ProductSort, String> {
    match s {
        "name" => Ok(ProductSort::Name),
        "amount" => Ok(ProductSort::Amount),
        _ => Err(format!("Unknown sort column {}, expected name or amount", s)),
    }
}

fn order(desc: bool) -> Order {
    if desc { Order::Desc } else { Order::Asc }
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let config = Config::resolve(opt.data_dir.as_deref())?;
    debug!("Using data directory {:?}", config.data_dir);

    let store = Store::open(FileBackend::new(&config.data_dir))
        .with_context(|| format!("Error opening store in {:?}", config.data_dir))?;
    let mut auth = AuthContext::new(store)?;

    let route = opt.cmd.route();
    if let Access::Redirect(to) = guard(route, auth.session()) {
        warn!("{} requires a session, redirecting to {}", route.path(), to.path());
        bail!("Not logged in, run `login` first");
    }

    match opt.cmd {
        Command::Login { username, password } => {
            let (username, password) = CredentialsForm { username, password }.for_login()?;
            let session = auth.login(&username, &password)?;
            println!("Logged in as {}", session.username);
        }
        Command::Register { username, password } => {
            let (username, password) = CredentialsForm { username, password }.for_register()?;
            let session = auth.register(&username, &password)?;
            println!("Registered {}", session.username);
        }
        Command::Logout => {
            auth.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            if let Some(session) = auth.session() {
                println!("Welcome {}", session.username);
            }
        }
        Command::Dashboard => show_dashboard(&Summary::load(auth.store())?),
        Command::Companies { cmd } => companies_command(auth.store_mut(), cmd)?,
        Command::Products { cmd } => products_command(auth.store_mut(), cmd)?,
    }
    Ok(())
}

fn show_menu(current: Route) {
    let menu = MENU.iter()
        .map(|(route, label)| if *route == current.selected_menu() {
            format!("[{}]", label)
        } else {
            label.to_string()
        })
        .join("  ");
    println!("{}\n", menu);
}

fn show_dashboard(summary: &Summary) {
    show_menu(Route::Dashboard);
    println!("Companies: {}", summary.company_count);
    println!("Products:  {}", summary.product_count);
    println!("\nLatest companies");
    for company in &summary.latest_companies {
        println!("  {:<24} {}", company.name, describe_company(company));
    }
    println!("\nLatest products");
    for product in &summary.latest_products {
        println!("  {:<24} {}", product.name, describe_product(product));
    }
}

fn print_page_footer(number: usize, total_pages: usize, total_items: usize) {
    println!("\nPage {}/{} ({} total)", number, total_pages, total_items);
}

fn print_companies(rows: &[Company]) {
    println!("{:<32}  {:<24} {:<14} {:<12} {}", "ID", "Company Name", "Legal Number", "Country", "Website");
    for c in rows {
        println!("{:<32}  {:<24} {:<14} {:<12} {}", c.id, c.name, c.legal_number, c.country, c.website);
    }
}

fn print_products(rows: &[Product], names: &CompanyNames) {
    println!("{:<32}  {:<24} {:<14} {:>10} {:<5} {}", "ID", "Product Name", "Category", "Amount", "Unit", "Company");
    for p in rows {
        println!("{:<32}  {:<24} {:<14} {:>10} {:<5} {}",
            p.id, p.name, p.category, p.amount, p.unit, names.name_of(&p.company_id));
    }
}

fn companies_command(store: &mut Store<FileBackend>, cmd: CompanyCommand) -> Result<()> {
    match cmd {
        CompanyCommand::List { search, country, sort, desc, page } => {
            show_menu(Route::Companies);
            let query = CompanyQuery { search, country, sort: sort.map(|s| (s, order(desc))) };
            let page = paginate(query.apply(store.list_companies()?), page, PAGE_SIZE);
            print_companies(&page.items);
            print_page_footer(page.number, page.total_pages, page.total_items);
        }
        CompanyCommand::Add { name, legal_number, country, website } => {
            let fields = CompanyForm { name, legal_number, country, website }.validate()?;
            let created = store.create_company(fields)?;
            println!("Company created: {}", created.id);
        }
        CompanyCommand::Edit { id, fields } => {
            let patch = forms::company_patch(&fields)?;
            store.update_company(&id, patch)?;
            println!("Company updated");
        }
        CompanyCommand::Delete { id } => {
            println!("{}", companies::delete_company(store, &id)?);
        }
    }
    Ok(())
}

fn products_command(store: &mut Store<FileBackend>, cmd: ProductCommand) -> Result<()> {
    match cmd {
        ProductCommand::List { search, category, sort, desc, page } => {
            show_menu(Route::Products);
            let names = CompanyNames::new(&store.list_companies()?);
            let query = ProductQuery { search, category, sort: sort.map(|s| (s, order(desc))) };
            let page = paginate(query.apply(store.list_products()?), page, PAGE_SIZE);
            print_products(&page.items, &names);
            print_page_footer(page.number, page.total_pages, page.total_items);
        }
        ProductCommand::Categories => {
            for category in products::categories(&store.list_products()?) {
                println!("{}", category);
            }
        }
        ProductCommand::Add { name, category, amount, unit, company_id } => {
            let companies = store.list_companies()?;
            let fields = ProductForm { name, category, amount, unit, company_id }.validate(&companies)?;
            let created = store.create_product(fields)?;
            println!("Product created: {}", created.id);
        }
        ProductCommand::Edit { id, fields } => {
            let patch = forms::product_patch(&fields, &store.list_companies()?)?;
            store.update_product(&id, patch)?;
            println!("Product updated");
        }
        ProductCommand::Delete { id } => {
            if !store.delete_product(&id)? {
                info!("No product with id {}", id);
            }
            println!("Deleted");
        }
    }
    Ok(())
}
