use clap::{Args as ClapArgs, Subcommand, ValueEnum};
use marketplace_sdk::UserRole;

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register(RegisterOptions),

    /// End the session, locally and on the backend
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse the catalog
    Products(ProductFilters),

    /// Show one product
    Product {
        /// Product ID
        id: String,
    },

    /// Show the shopping cart
    Cart,

    /// List your orders
    Orders,

    /// Show one order
    Order {
        /// Order ID
        id: String,
    },

    /// List favorite products
    Favorites,

    /// Send a raw request through the authenticated client
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,

        /// Path below the API base URL, e.g. /api/orders
        path: String,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        /// Do not send the stored access token
        #[arg(long)]
        no_auth: bool,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
}

/// Options for `register`
#[derive(ClapArgs, Debug, Default)]
pub struct RegisterOptions {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Display name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Account type
    #[arg(long, value_enum, default_value_t = RoleArg::Customer)]
    pub role: RoleArg,

    /// Company name, vendors only
    #[arg(long)]
    pub company: Option<String>,
}

/// Roles a user can sign up with
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleArg {
    #[default]
    Customer,
    Vendor,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Customer => UserRole::Customer,
            RoleArg::Vendor => UserRole::Vendor,
        }
    }
}

/// Catalog filters
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct ProductFilters {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
}
