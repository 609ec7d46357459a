// Rust guideline compliant 2026-02-06

//! Command-line argument definitions for `snet`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snet",
    version,
    about = "ShareNet: campus marketplace core",
    long_about = "ShareNet lets students lend, sell and give items, negotiate requests, settle transactions and reunite lost items with their owners. All state lives in JSONL files under the data directory.",
    after_help = "Examples:\n  snet init\n  snet --as alice item create \"Graphing calculator\" --mode rent --price 5\n  snet --as bob request create itm-1a2b3c4d --duration 7\n  snet --as alice request accept req-5e6f7a8b\n  snet --as alice txn propose txn-9c0d1e2f --duration 7\n  snet --as bob claim create lfp-3a4b5c6d --message \"That's my bag\"\n"
)]
pub struct Cli {
    /// Data directory (defaults to ./.sharenet)
    #[arg(long, global = true, env = "SHARENET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Acting user
    #[arg(long = "as", global = true, env = "SHARENET_USER", value_name = "USER")]
    pub as_user: Option<String>,

    /// Enable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Append JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// JSON envelopes.
    Json,
    /// Bordered tables.
    Table,
    /// Borderless text.
    Plain,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a data directory
    Init,

    /// Manage item listings
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Request, negotiate and claim items
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Drive transactions through agreement, return and dispute
    Txn {
        #[command(subcommand)]
        action: TxnAction,
    },

    /// Manage lost&found posts
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Claim lost&found posts and verify claimants
    Claim {
        #[command(subcommand)]
        action: ClaimAction,
    },

    /// Post wanted items and answer them with offers
    Wanted {
        #[command(subcommand)]
        action: WantedAction,
    },

    /// Show a user's trust score
    Trust {
        /// User to look up (defaults to the acting user)
        user: Option<String>,
    },
}

/// Page selection shared by list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size (defaults to the configured page_size)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum ItemAction {
    /// List an item
    Create {
        /// Item title
        title: String,

        /// Offer mode (rent, sell, give)
        #[arg(long)]
        mode: String,

        /// Price, required for rent and sell
        #[arg(long)]
        price: Option<f64>,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Allow instant claims (give only)
        #[arg(long)]
        instant_claim: bool,

        /// Claim queue capacity
        #[arg(long, default_value_t = 1)]
        max_claimers: u32,
    },

    /// Show an item
    Show {
        /// Item ID
        id: String,
    },

    /// List items
    List {
        /// Include unavailable items
        #[arg(long)]
        all: bool,

        /// Filter by mode
        #[arg(long)]
        mode: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Edit a listing you own
    Edit {
        /// Item ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New offer mode (rent, sell, give)
        #[arg(long)]
        mode: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<f64>,

        /// New claim queue capacity
        #[arg(long)]
        max_claimers: Option<u32>,
    },

    /// Mark an item available
    Open {
        /// Item ID
        id: String,
    },

    /// Mark an item unavailable
    Close {
        /// Item ID
        id: String,
    },

    /// Claim a free item instantly
    Claim {
        /// Item ID
        id: String,
    },

    /// Show the pickup queue of an item
    Queue {
        /// Item ID
        id: String,
    },

    /// List requests received for an item
    Requests {
        /// Item ID
        id: String,

        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum RequestAction {
    /// Request an item
    Create {
        /// Item ID
        item: String,

        /// Message to the owner
        #[arg(long)]
        message: Option<String>,

        /// Proposed price
        #[arg(long)]
        price: Option<f64>,

        /// Proposed duration in days
        #[arg(long)]
        duration: Option<String>,
    },

    /// Accept a pending request
    Accept {
        /// Request ID
        id: String,
    },

    /// Reject a pending request
    Reject {
        /// Request ID
        id: String,

        /// Reason shown to the requester
        #[arg(long)]
        reason: Option<String>,
    },

    /// Cancel your pending request
    Cancel {
        /// Request ID
        id: String,
    },

    /// Counter a request with new terms
    Counter {
        /// Request ID
        id: String,

        /// Counter price
        #[arg(long)]
        price: Option<f64>,

        /// Counter duration in days
        #[arg(long)]
        duration: Option<String>,

        /// Message to the requester
        #[arg(long)]
        message: Option<String>,
    },

    /// Accept or reject a counter offer
    Respond {
        /// Request ID
        id: String,

        /// Accept the counter offer
        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        accept: bool,

        /// Reject the counter offer
        #[arg(long)]
        reject: bool,
    },

    /// Propose pickup details
    Pickup {
        /// Request ID
        id: String,

        /// Meeting place
        #[arg(long)]
        location: String,

        /// Pickup time (unix seconds, RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        time: String,

        /// Extra instructions
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Confirm proposed pickup details
    ConfirmDetails {
        /// Request ID
        id: String,
    },

    /// Confirm the item was picked up
    PickedUp {
        /// Request ID
        id: String,
    },

    /// List requests you sent
    Mine {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List requests for your items
    Received {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum TxnAction {
    /// Show a transaction
    Show {
        /// Transaction ID
        id: String,
    },

    /// List your transactions
    List {
        /// Only transactions where you are the owner or the requester
        #[arg(long, value_parser = ["owner", "requester"])]
        role: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Propose final terms (owner)
    Propose {
        /// Transaction ID
        id: String,

        /// Agreed price
        #[arg(long)]
        price: Option<f64>,

        /// Agreed duration in days
        #[arg(long)]
        duration: Option<String>,

        /// Free-form terms
        #[arg(long)]
        terms: Option<String>,

        /// Start of the exchange
        #[arg(long)]
        start: Option<String>,

        /// End of the exchange
        #[arg(long)]
        end: Option<String>,
    },

    /// Confirm proposed terms (requester)
    Confirm {
        /// Transaction ID
        id: String,
    },

    /// Announce the item is being returned
    Return {
        /// Transaction ID
        id: String,
    },

    /// Confirm the item came back (owner)
    Returned {
        /// Transaction ID
        id: String,
    },

    /// Raise a dispute
    Dispute {
        /// Transaction ID
        id: String,

        /// What went wrong
        #[arg(long)]
        reason: String,
    },

    /// Move a transaction to any status its transition table allows
    Status {
        /// Transaction ID
        id: String,

        /// Target status
        status: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostAction {
    /// Report a lost or found item
    Create {
        /// Post title
        title: String,

        /// Post type (lost, found)
        #[arg(long = "type")]
        post_type: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Where it was lost or found
        #[arg(long, default_value = "")]
        location: String,

        /// Verification question (pair each with --answer)
        #[arg(long)]
        question: Vec<String>,

        /// Expected answer, in the same order as --question
        #[arg(long)]
        answer: Vec<String>,
    },

    /// Show a post
    Show {
        /// Post ID
        id: String,
    },

    /// List posts
    List {
        /// Filter by type
        #[arg(long = "type")]
        post_type: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Stop accepting claims
    Expire {
        /// Post ID
        id: String,
    },

    /// Resolve a post, with the winning claim or without one
    Resolve {
        /// Post ID
        id: String,

        /// Winning claim ID
        #[arg(long)]
        claim: Option<String>,
    },

    /// List claims on your post
    Claims {
        /// Post ID
        id: String,

        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClaimAction {
    /// Claim a post
    Create {
        /// Post ID
        post: String,

        /// Message to the poster
        #[arg(long)]
        message: String,
    },

    /// Show a claim
    Show {
        /// Claim ID
        id: String,
    },

    /// Send verification questions to the claimant (poster)
    Verify {
        /// Claim ID
        id: String,
    },

    /// Answer verification questions (claimant)
    Answer {
        /// Claim ID
        id: String,

        /// Answer as QUESTION_ID=TEXT, repeatable
        #[arg(long = "answer", value_name = "QUESTION_ID=TEXT")]
        answers: Vec<String>,
    },

    /// Accept a claim after verification (poster)
    Approve {
        /// Claim ID
        id: String,
    },

    /// Reject a claim (poster)
    Reject {
        /// Claim ID
        id: String,

        /// Reason recorded in the timeline
        #[arg(long)]
        reason: Option<String>,
    },

    /// Propose a meetup
    Meetup {
        /// Claim ID
        id: String,

        /// Meeting place
        #[arg(long)]
        location: String,

        /// Meeting time (unix seconds, RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        time: String,
    },

    /// Accept the proposed meetup
    AcceptMeetup {
        /// Claim ID
        id: String,
    },

    /// List claims you submitted
    Mine {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List claims on your posts
    Received {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum WantedAction {
    /// Post a wanted item
    Create {
        /// Title
        title: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Highest acceptable price
        #[arg(long)]
        budget: Option<f64>,
    },

    /// Show a wanted item with its offers
    Show {
        /// Wanted item ID
        id: String,
    },

    /// List wanted items
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Offer to fulfil a wanted item
    Offer {
        /// Wanted item ID
        id: String,

        /// Message to the poster
        #[arg(long)]
        message: String,

        /// Offer type (free, sell, rent)
        #[arg(long = "type")]
        offer_type: String,

        /// Asking price
        #[arg(long)]
        price: Option<f64>,
    },

    /// Accept an offer (poster)
    Accept {
        /// Wanted item ID
        id: String,

        /// Offer ID
        offer: String,
    },

    /// Decline an offer (poster)
    Reject {
        /// Wanted item ID
        id: String,

        /// Offer ID
        offer: String,
    },

    /// Withdraw your offer
    Withdraw {
        /// Wanted item ID
        id: String,

        /// Offer ID
        offer: String,
    },

    /// List offers you made
    Offers {
        /// Filter by offer status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List your wanted items that received offers
    Received {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Mark a wanted item fulfilled
    Fulfilled {
        /// Wanted item ID
        id: String,
    },
}
