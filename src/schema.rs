//! Benchmark and table catalogs.
//!
//! Every relation of every supported benchmark is described by an Arrow
//! [`Schema`]. The catalog drives both sides of the pipeline: the CSV reader
//! that parses external generator output, and the Hive DDL emitted for the
//! warehouse. Decimal precision/scale and integer widths follow the published
//! benchmark specifications.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::fmt;
use std::sync::Arc;

/// The benchmarks this crate can generate data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Benchmark {
    /// TPC-H, generated natively.
    Tpch,
    /// TPC-DS, generated by wrapping the external `dsdgen` tool.
    Tpcds,
    /// The Star Schema Benchmark, generated by wrapping the SSB `dbgen` tool.
    Ssb,
}

impl Benchmark {
    /// Lowercase name used in file names and Hive database names.
    pub fn name(&self) -> &'static str {
        match self {
            Benchmark::Tpch => "tpch",
            Benchmark::Tpcds => "tpcds",
            Benchmark::Ssb => "ssb",
        }
    }

    /// Human-readable name used in logs and generated file headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Benchmark::Tpch => "TPC-H",
            Benchmark::Tpcds => "TPC-DS",
            Benchmark::Ssb => "SSB",
        }
    }

    /// All tables of this benchmark, in generation order.
    pub fn tables(&self) -> &'static [&'static str] {
        match self {
            Benchmark::Tpch => TPCH_TABLES,
            Benchmark::Tpcds => TPCDS_TABLES,
            Benchmark::Ssb => SSB_TABLES,
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

pub const TPCH_TABLES: &[&str] = &[
    "region", "nation", "supplier", "customer", "part", "partsupp", "orders", "lineitem",
];

pub const TPCDS_TABLES: &[&str] = &[
    "call_center",
    "catalog_page",
    "catalog_returns",
    "catalog_sales",
    "customer",
    "customer_address",
    "customer_demographics",
    "date_dim",
    "household_demographics",
    "income_band",
    "inventory",
    "item",
    "promotion",
    "reason",
    "ship_mode",
    "store",
    "store_returns",
    "store_sales",
    "time_dim",
    "warehouse",
    "web_page",
    "web_returns",
    "web_sales",
    "web_site",
];

pub const SSB_TABLES: &[&str] = &["customer", "dates", "lineorder", "part", "supplier"];

/// Scale factor as a Hive-identifier-safe tag: `1.0` -> `1`, `0.1` -> `0_1`.
pub fn scale_factor_tag(scale_factor: f64) -> String {
    format!("{scale_factor}").replace('.', "_")
}

/// Hive database name for a benchmark at a scale factor, e.g. `tpch_sf1`.
pub fn database_name(benchmark: Benchmark, scale_factor: f64) -> String {
    format!("{}_sf{}", benchmark.name(), scale_factor_tag(scale_factor))
}

/// Name of the flat file the external generator writes for a table.
///
/// dsdgen writes `<table>.dat`, the SSB dbgen writes `<table>.tbl`. The SSB
/// date dimension is the one special case: its file is `date.tbl` but `date`
/// is a reserved word in Hive, so the catalog names the table `dates`.
pub fn flat_file_name(benchmark: Benchmark, table: &str) -> String {
    match benchmark {
        Benchmark::Tpch => format!("{table}.tbl"),
        Benchmark::Tpcds => format!("{table}.dat"),
        Benchmark::Ssb if table == "dates" => "date.tbl".to_string(),
        Benchmark::Ssb => format!("{table}.tbl"),
    }
}

/// Arrow schema for a table, or `None` if the benchmark has no such table.
pub fn table_schema(benchmark: Benchmark, table: &str) -> Option<SchemaRef> {
    let fields = match benchmark {
        Benchmark::Tpch => tpch_fields(table)?,
        Benchmark::Tpcds => tpcds_fields(table)?,
        Benchmark::Ssb => ssb_fields(table)?,
    };
    Some(Arc::new(Schema::new(fields)))
}

// All columns are nullable: the external generators emit empty fields for
// NULLs and the CSV reader maps them accordingly.
fn f(name: &str, data_type: DataType) -> Field {
    Field::new(name, data_type, true)
}

fn int32(name: &str) -> Field {
    f(name, DataType::Int32)
}

fn int64(name: &str) -> Field {
    f(name, DataType::Int64)
}

fn utf8(name: &str) -> Field {
    f(name, DataType::Utf8)
}

fn date(name: &str) -> Field {
    f(name, DataType::Date32)
}

fn dec(name: &str, precision: u8, scale: i8) -> Field {
    f(name, DataType::Decimal128(precision, scale))
}

fn tpch_fields(table: &str) -> Option<Vec<Field>> {
    let fields = match table {
        "region" => vec![int64("r_regionkey"), utf8("r_name"), utf8("r_comment")],
        "nation" => vec![
            int64("n_nationkey"),
            utf8("n_name"),
            int64("n_regionkey"),
            utf8("n_comment"),
        ],
        "supplier" => vec![
            int64("s_suppkey"),
            utf8("s_name"),
            utf8("s_address"),
            int64("s_nationkey"),
            utf8("s_phone"),
            dec("s_acctbal", 15, 2),
            utf8("s_comment"),
        ],
        "customer" => vec![
            int64("c_custkey"),
            utf8("c_name"),
            utf8("c_address"),
            int64("c_nationkey"),
            utf8("c_phone"),
            dec("c_acctbal", 15, 2),
            utf8("c_mktsegment"),
            utf8("c_comment"),
        ],
        "part" => vec![
            int64("p_partkey"),
            utf8("p_name"),
            utf8("p_mfgr"),
            utf8("p_brand"),
            utf8("p_type"),
            int32("p_size"),
            utf8("p_container"),
            dec("p_retailprice", 15, 2),
            utf8("p_comment"),
        ],
        "partsupp" => vec![
            int64("ps_partkey"),
            int64("ps_suppkey"),
            int32("ps_availqty"),
            dec("ps_supplycost", 15, 2),
            utf8("ps_comment"),
        ],
        "orders" => vec![
            int64("o_orderkey"),
            int64("o_custkey"),
            utf8("o_orderstatus"),
            dec("o_totalprice", 15, 2),
            date("o_orderdate"),
            utf8("o_orderpriority"),
            utf8("o_clerk"),
            int32("o_shippriority"),
            utf8("o_comment"),
        ],
        "lineitem" => vec![
            int64("l_orderkey"),
            int64("l_partkey"),
            int64("l_suppkey"),
            int32("l_linenumber"),
            dec("l_quantity", 15, 2),
            dec("l_extendedprice", 15, 2),
            dec("l_discount", 15, 2),
            dec("l_tax", 15, 2),
            utf8("l_returnflag"),
            utf8("l_linestatus"),
            date("l_shipdate"),
            date("l_commitdate"),
            date("l_receiptdate"),
            utf8("l_shipinstruct"),
            utf8("l_shipmode"),
            utf8("l_comment"),
        ],
        _ => return None,
    };
    Some(fields)
}

fn tpcds_fields(table: &str) -> Option<Vec<Field>> {
    let fields = match table {
        "call_center" => vec![
            int64("cc_call_center_sk"),
            utf8("cc_call_center_id"),
            date("cc_rec_start_date"),
            date("cc_rec_end_date"),
            int64("cc_closed_date_sk"),
            int64("cc_open_date_sk"),
            utf8("cc_name"),
            utf8("cc_class"),
            int32("cc_employees"),
            int32("cc_sq_ft"),
            utf8("cc_hours"),
            utf8("cc_manager"),
            int32("cc_mkt_id"),
            utf8("cc_mkt_class"),
            utf8("cc_mkt_desc"),
            utf8("cc_market_manager"),
            int32("cc_division"),
            utf8("cc_division_name"),
            int32("cc_company"),
            utf8("cc_company_name"),
            utf8("cc_street_number"),
            utf8("cc_street_name"),
            utf8("cc_street_type"),
            utf8("cc_suite_number"),
            utf8("cc_city"),
            utf8("cc_county"),
            utf8("cc_state"),
            utf8("cc_zip"),
            utf8("cc_country"),
            dec("cc_gmt_offset", 5, 2),
            dec("cc_tax_percentage", 5, 2),
        ],
        "catalog_page" => vec![
            int64("cp_catalog_page_sk"),
            utf8("cp_catalog_page_id"),
            int64("cp_start_date_sk"),
            int64("cp_end_date_sk"),
            utf8("cp_department"),
            int32("cp_catalog_number"),
            int32("cp_catalog_page_number"),
            utf8("cp_description"),
            utf8("cp_type"),
        ],
        "catalog_returns" => vec![
            int64("cr_returned_date_sk"),
            int64("cr_returned_time_sk"),
            int64("cr_item_sk"),
            int64("cr_refunded_customer_sk"),
            int64("cr_refunded_cdemo_sk"),
            int64("cr_refunded_hdemo_sk"),
            int64("cr_refunded_addr_sk"),
            int64("cr_returning_customer_sk"),
            int64("cr_returning_cdemo_sk"),
            int64("cr_returning_hdemo_sk"),
            int64("cr_returning_addr_sk"),
            int64("cr_call_center_sk"),
            int64("cr_catalog_page_sk"),
            int64("cr_ship_mode_sk"),
            int64("cr_warehouse_sk"),
            int64("cr_reason_sk"),
            int64("cr_order_number"),
            int32("cr_return_quantity"),
            dec("cr_return_amount", 7, 2),
            dec("cr_return_tax", 7, 2),
            dec("cr_return_amt_inc_tax", 7, 2),
            dec("cr_fee", 7, 2),
            dec("cr_return_ship_cost", 7, 2),
            dec("cr_refunded_cash", 7, 2),
            dec("cr_reversed_charge", 7, 2),
            dec("cr_store_credit", 7, 2),
            dec("cr_net_loss", 7, 2),
        ],
        "catalog_sales" => vec![
            int64("cs_sold_date_sk"),
            int64("cs_sold_time_sk"),
            int64("cs_ship_date_sk"),
            int64("cs_bill_customer_sk"),
            int64("cs_bill_cdemo_sk"),
            int64("cs_bill_hdemo_sk"),
            int64("cs_bill_addr_sk"),
            int64("cs_ship_customer_sk"),
            int64("cs_ship_cdemo_sk"),
            int64("cs_ship_hdemo_sk"),
            int64("cs_ship_addr_sk"),
            int64("cs_call_center_sk"),
            int64("cs_catalog_page_sk"),
            int64("cs_ship_mode_sk"),
            int64("cs_warehouse_sk"),
            int64("cs_item_sk"),
            int64("cs_promo_sk"),
            int64("cs_order_number"),
            int32("cs_quantity"),
            dec("cs_wholesale_cost", 7, 2),
            dec("cs_list_price", 7, 2),
            dec("cs_sales_price", 7, 2),
            dec("cs_ext_discount_amt", 7, 2),
            dec("cs_ext_sales_price", 7, 2),
            dec("cs_ext_wholesale_cost", 7, 2),
            dec("cs_ext_list_price", 7, 2),
            dec("cs_ext_tax", 7, 2),
            dec("cs_coupon_amt", 7, 2),
            dec("cs_ext_ship_cost", 7, 2),
            dec("cs_net_paid", 7, 2),
            dec("cs_net_paid_inc_tax", 7, 2),
            dec("cs_net_paid_inc_ship", 7, 2),
            dec("cs_net_paid_inc_ship_tax", 7, 2),
            dec("cs_net_profit", 7, 2),
        ],
        "customer" => vec![
            int64("c_customer_sk"),
            utf8("c_customer_id"),
            int64("c_current_cdemo_sk"),
            int64("c_current_hdemo_sk"),
            int64("c_current_addr_sk"),
            int64("c_first_shipto_date_sk"),
            int64("c_first_sales_date_sk"),
            utf8("c_salutation"),
            utf8("c_first_name"),
            utf8("c_last_name"),
            utf8("c_preferred_cust_flag"),
            int32("c_birth_day"),
            int32("c_birth_month"),
            int32("c_birth_year"),
            utf8("c_birth_country"),
            utf8("c_login"),
            utf8("c_email_address"),
            int64("c_last_review_date_sk"),
        ],
        "customer_address" => vec![
            int64("ca_address_sk"),
            utf8("ca_address_id"),
            utf8("ca_street_number"),
            utf8("ca_street_name"),
            utf8("ca_street_type"),
            utf8("ca_suite_number"),
            utf8("ca_city"),
            utf8("ca_county"),
            utf8("ca_state"),
            utf8("ca_zip"),
            utf8("ca_country"),
            dec("ca_gmt_offset", 5, 2),
            utf8("ca_location_type"),
        ],
        "customer_demographics" => vec![
            int64("cd_demo_sk"),
            utf8("cd_gender"),
            utf8("cd_marital_status"),
            utf8("cd_education_status"),
            int32("cd_purchase_estimate"),
            utf8("cd_credit_rating"),
            int32("cd_dep_count"),
            int32("cd_dep_employed_count"),
            int32("cd_dep_college_count"),
        ],
        "date_dim" => vec![
            int64("d_date_sk"),
            utf8("d_date_id"),
            date("d_date"),
            int32("d_month_seq"),
            int32("d_week_seq"),
            int32("d_quarter_seq"),
            int32("d_year"),
            int32("d_dow"),
            int32("d_moy"),
            int32("d_dom"),
            int32("d_qoy"),
            int32("d_fy_year"),
            int32("d_fy_quarter_seq"),
            int32("d_fy_week_seq"),
            utf8("d_day_name"),
            utf8("d_quarter_name"),
            utf8("d_holiday"),
            utf8("d_weekend"),
            utf8("d_following_holiday"),
            int32("d_first_dom"),
            int32("d_last_dom"),
            int32("d_same_day_ly"),
            int32("d_same_day_lq"),
            utf8("d_current_day"),
            utf8("d_current_week"),
            utf8("d_current_month"),
            utf8("d_current_quarter"),
            utf8("d_current_year"),
        ],
        "household_demographics" => vec![
            int64("hd_demo_sk"),
            int64("hd_income_band_sk"),
            utf8("hd_buy_potential"),
            int32("hd_dep_count"),
            int32("hd_vehicle_count"),
        ],
        "income_band" => vec![
            int64("ib_income_band_sk"),
            int32("ib_lower_bound"),
            int32("ib_upper_bound"),
        ],
        "inventory" => vec![
            int64("inv_date_sk"),
            int64("inv_item_sk"),
            int64("inv_warehouse_sk"),
            int32("inv_quantity_on_hand"),
        ],
        "item" => vec![
            int64("i_item_sk"),
            utf8("i_item_id"),
            date("i_rec_start_date"),
            date("i_rec_end_date"),
            utf8("i_item_desc"),
            dec("i_current_price", 7, 2),
            dec("i_wholesale_cost", 7, 2),
            int32("i_brand_id"),
            utf8("i_brand"),
            int32("i_class_id"),
            utf8("i_class"),
            int32("i_category_id"),
            utf8("i_category"),
            int32("i_manufact_id"),
            utf8("i_manufact"),
            utf8("i_size"),
            utf8("i_formulation"),
            utf8("i_color"),
            utf8("i_units"),
            utf8("i_container"),
            int32("i_manager_id"),
            utf8("i_product_name"),
        ],
        "promotion" => vec![
            int64("p_promo_sk"),
            utf8("p_promo_id"),
            int64("p_start_date_sk"),
            int64("p_end_date_sk"),
            int64("p_item_sk"),
            dec("p_cost", 15, 2),
            int32("p_response_target"),
            utf8("p_promo_name"),
            utf8("p_channel_dmail"),
            utf8("p_channel_email"),
            utf8("p_channel_catalog"),
            utf8("p_channel_tv"),
            utf8("p_channel_radio"),
            utf8("p_channel_press"),
            utf8("p_channel_event"),
            utf8("p_channel_demo"),
            utf8("p_channel_details"),
            utf8("p_purpose"),
            utf8("p_discount_active"),
        ],
        "reason" => vec![int64("r_reason_sk"), utf8("r_reason_id"), utf8("r_reason_desc")],
        "ship_mode" => vec![
            int64("sm_ship_mode_sk"),
            utf8("sm_ship_mode_id"),
            utf8("sm_type"),
            utf8("sm_code"),
            utf8("sm_carrier"),
            utf8("sm_contract"),
        ],
        "store" => vec![
            int64("s_store_sk"),
            utf8("s_store_id"),
            date("s_rec_start_date"),
            date("s_rec_end_date"),
            int64("s_closed_date_sk"),
            utf8("s_store_name"),
            int32("s_number_employees"),
            int32("s_floor_space"),
            utf8("s_hours"),
            utf8("s_manager"),
            int32("s_market_id"),
            utf8("s_geography_class"),
            utf8("s_market_desc"),
            utf8("s_market_manager"),
            int32("s_division_id"),
            utf8("s_division_name"),
            int32("s_company_id"),
            utf8("s_company_name"),
            utf8("s_street_number"),
            utf8("s_street_name"),
            utf8("s_street_type"),
            utf8("s_suite_number"),
            utf8("s_city"),
            utf8("s_county"),
            utf8("s_state"),
            utf8("s_zip"),
            utf8("s_country"),
            dec("s_gmt_offset", 5, 2),
            // The column name typo is part of the published TPC-DS schema.
            dec("s_tax_precentage", 5, 2),
        ],
        "store_returns" => vec![
            int64("sr_returned_date_sk"),
            int64("sr_return_time_sk"),
            int64("sr_item_sk"),
            int64("sr_customer_sk"),
            int64("sr_cdemo_sk"),
            int64("sr_hdemo_sk"),
            int64("sr_addr_sk"),
            int64("sr_store_sk"),
            int64("sr_reason_sk"),
            int64("sr_ticket_number"),
            int32("sr_return_quantity"),
            dec("sr_return_amt", 7, 2),
            dec("sr_return_tax", 7, 2),
            dec("sr_return_amt_inc_tax", 7, 2),
            dec("sr_fee", 7, 2),
            dec("sr_return_ship_cost", 7, 2),
            dec("sr_refunded_cash", 7, 2),
            dec("sr_reversed_charge", 7, 2),
            dec("sr_store_credit", 7, 2),
            dec("sr_net_loss", 7, 2),
        ],
        "store_sales" => vec![
            int64("ss_sold_date_sk"),
            int64("ss_sold_time_sk"),
            int64("ss_item_sk"),
            int64("ss_customer_sk"),
            int64("ss_cdemo_sk"),
            int64("ss_hdemo_sk"),
            int64("ss_addr_sk"),
            int64("ss_store_sk"),
            int64("ss_promo_sk"),
            int64("ss_ticket_number"),
            int32("ss_quantity"),
            dec("ss_wholesale_cost", 7, 2),
            dec("ss_list_price", 7, 2),
            dec("ss_sales_price", 7, 2),
            dec("ss_ext_discount_amt", 7, 2),
            dec("ss_ext_sales_price", 7, 2),
            dec("ss_ext_wholesale_cost", 7, 2),
            dec("ss_ext_list_price", 7, 2),
            dec("ss_ext_tax", 7, 2),
            dec("ss_coupon_amt", 7, 2),
            dec("ss_net_paid", 7, 2),
            dec("ss_net_paid_inc_tax", 7, 2),
            dec("ss_net_profit", 7, 2),
        ],
        "time_dim" => vec![
            int64("t_time_sk"),
            utf8("t_time_id"),
            int32("t_time"),
            int32("t_hour"),
            int32("t_minute"),
            int32("t_second"),
            utf8("t_am_pm"),
            utf8("t_shift"),
            utf8("t_sub_shift"),
            utf8("t_meal_time"),
        ],
        "warehouse" => vec![
            int64("w_warehouse_sk"),
            utf8("w_warehouse_id"),
            utf8("w_warehouse_name"),
            int32("w_warehouse_sq_ft"),
            utf8("w_street_number"),
            utf8("w_street_name"),
            utf8("w_street_type"),
            utf8("w_suite_number"),
            utf8("w_city"),
            utf8("w_county"),
            utf8("w_state"),
            utf8("w_zip"),
            utf8("w_country"),
            dec("w_gmt_offset", 5, 2),
        ],
        "web_page" => vec![
            int64("wp_web_page_sk"),
            utf8("wp_web_page_id"),
            date("wp_rec_start_date"),
            date("wp_rec_end_date"),
            int64("wp_creation_date_sk"),
            int64("wp_access_date_sk"),
            utf8("wp_autogen_flag"),
            int64("wp_customer_sk"),
            utf8("wp_url"),
            utf8("wp_type"),
            int32("wp_char_count"),
            int32("wp_link_count"),
            int32("wp_image_count"),
            int32("wp_max_ad_count"),
        ],
        "web_returns" => vec![
            int64("wr_returned_date_sk"),
            int64("wr_returned_time_sk"),
            int64("wr_item_sk"),
            int64("wr_refunded_customer_sk"),
            int64("wr_refunded_cdemo_sk"),
            int64("wr_refunded_hdemo_sk"),
            int64("wr_refunded_addr_sk"),
            int64("wr_returning_customer_sk"),
            int64("wr_returning_cdemo_sk"),
            int64("wr_returning_hdemo_sk"),
            int64("wr_returning_addr_sk"),
            int64("wr_web_page_sk"),
            int64("wr_reason_sk"),
            int64("wr_order_number"),
            int32("wr_return_quantity"),
            dec("wr_return_amt", 7, 2),
            dec("wr_return_tax", 7, 2),
            dec("wr_return_amt_inc_tax", 7, 2),
            dec("wr_fee", 7, 2),
            dec("wr_return_ship_cost", 7, 2),
            dec("wr_refunded_cash", 7, 2),
            dec("wr_reversed_charge", 7, 2),
            dec("wr_account_credit", 7, 2),
            dec("wr_net_loss", 7, 2),
        ],
        "web_sales" => vec![
            int64("ws_sold_date_sk"),
            int64("ws_sold_time_sk"),
            int64("ws_ship_date_sk"),
            int64("ws_item_sk"),
            int64("ws_bill_customer_sk"),
            int64("ws_bill_cdemo_sk"),
            int64("ws_bill_hdemo_sk"),
            int64("ws_bill_addr_sk"),
            int64("ws_ship_customer_sk"),
            int64("ws_ship_cdemo_sk"),
            int64("ws_ship_hdemo_sk"),
            int64("ws_ship_addr_sk"),
            int64("ws_web_page_sk"),
            int64("ws_web_site_sk"),
            int64("ws_ship_mode_sk"),
            int64("ws_warehouse_sk"),
            int64("ws_promo_sk"),
            int64("ws_order_number"),
            int32("ws_quantity"),
            dec("ws_wholesale_cost", 7, 2),
            dec("ws_list_price", 7, 2),
            dec("ws_sales_price", 7, 2),
            dec("ws_ext_discount_amt", 7, 2),
            dec("ws_ext_sales_price", 7, 2),
            dec("ws_ext_wholesale_cost", 7, 2),
            dec("ws_ext_list_price", 7, 2),
            dec("ws_ext_tax", 7, 2),
            dec("ws_coupon_amt", 7, 2),
            dec("ws_ext_ship_cost", 7, 2),
            dec("ws_net_paid", 7, 2),
            dec("ws_net_paid_inc_tax", 7, 2),
            dec("ws_net_paid_inc_ship", 7, 2),
            dec("ws_net_paid_inc_ship_tax", 7, 2),
            dec("ws_net_profit", 7, 2),
        ],
        "web_site" => vec![
            int64("web_site_sk"),
            utf8("web_site_id"),
            date("web_rec_start_date"),
            date("web_rec_end_date"),
            utf8("web_name"),
            int64("web_open_date_sk"),
            int64("web_close_date_sk"),
            utf8("web_class"),
            utf8("web_manager"),
            int32("web_mkt_id"),
            utf8("web_mkt_class"),
            utf8("web_mkt_desc"),
            utf8("web_market_manager"),
            int32("web_company_id"),
            utf8("web_company_name"),
            utf8("web_street_number"),
            utf8("web_street_name"),
            utf8("web_street_type"),
            utf8("web_suite_number"),
            utf8("web_city"),
            utf8("web_county"),
            utf8("web_state"),
            utf8("web_zip"),
            utf8("web_country"),
            dec("web_gmt_offset", 5, 2),
            dec("web_tax_percentage", 5, 2),
        ],
        _ => return None,
    };
    Some(fields)
}

// SSB measures are plain integers, per the benchmark definition.
fn ssb_fields(table: &str) -> Option<Vec<Field>> {
    let fields = match table {
        "customer" => vec![
            int64("c_custkey"),
            utf8("c_name"),
            utf8("c_address"),
            utf8("c_city"),
            utf8("c_nation"),
            utf8("c_region"),
            utf8("c_phone"),
            utf8("c_mktsegment"),
        ],
        "dates" => vec![
            int32("d_datekey"),
            utf8("d_date"),
            utf8("d_dayofweek"),
            utf8("d_month"),
            int32("d_year"),
            int32("d_yearmonthnum"),
            utf8("d_yearmonth"),
            int32("d_daynuminweek"),
            int32("d_daynuminmonth"),
            int32("d_daynuminyear"),
            int32("d_monthnuminyear"),
            int32("d_weeknuminyear"),
            utf8("d_sellingseason"),
            int32("d_lastdayinweekfl"),
            int32("d_lastdayinmonthfl"),
            int32("d_holidayfl"),
            int32("d_weekdayfl"),
        ],
        "lineorder" => vec![
            int64("lo_orderkey"),
            int32("lo_linenumber"),
            int64("lo_custkey"),
            int64("lo_partkey"),
            int64("lo_suppkey"),
            int32("lo_orderdate"),
            utf8("lo_orderpriority"),
            utf8("lo_shippriority"),
            int32("lo_quantity"),
            int64("lo_extendedprice"),
            int64("lo_ordtotalprice"),
            int32("lo_discount"),
            int64("lo_revenue"),
            int64("lo_supplycost"),
            int32("lo_tax"),
            int32("lo_commitdate"),
            utf8("lo_shipmode"),
        ],
        "part" => vec![
            int64("p_partkey"),
            utf8("p_name"),
            utf8("p_mfgr"),
            utf8("p_category"),
            utf8("p_brand1"),
            utf8("p_color"),
            utf8("p_type"),
            int32("p_size"),
            utf8("p_container"),
        ],
        "supplier" => vec![
            int64("s_suppkey"),
            utf8("s_name"),
            utf8("s_address"),
            utf8("s_city"),
            utf8("s_nation"),
            utf8("s_region"),
            utf8("s_phone"),
        ],
        _ => return None,
    };
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_tags() {
        assert_eq!(scale_factor_tag(1.0), "1");
        assert_eq!(scale_factor_tag(100.0), "100");
        assert_eq!(scale_factor_tag(0.1), "0_1");
        assert_eq!(scale_factor_tag(0.01), "0_01");
    }

    #[test]
    fn database_names() {
        assert_eq!(database_name(Benchmark::Tpch, 1.0), "tpch_sf1");
        assert_eq!(database_name(Benchmark::Tpcds, 10.0), "tpcds_sf10");
        assert_eq!(database_name(Benchmark::Ssb, 0.5), "ssb_sf0_5");
    }

    #[test]
    fn every_cataloged_table_has_a_schema() {
        for benchmark in [Benchmark::Tpch, Benchmark::Tpcds, Benchmark::Ssb] {
            for table in benchmark.tables() {
                assert!(
                    table_schema(benchmark, table).is_some(),
                    "{benchmark} table {table} has no schema"
                );
            }
        }
    }

    #[test]
    fn unknown_tables_have_no_schema() {
        assert!(table_schema(Benchmark::Tpch, "store_sales").is_none());
        assert!(table_schema(Benchmark::Ssb, "date").is_none());
    }

    #[test]
    fn column_counts_match_benchmark_specs() {
        let cols = |b, t| table_schema(b, t).unwrap().fields().len();
        assert_eq!(cols(Benchmark::Tpch, "lineitem"), 16);
        assert_eq!(cols(Benchmark::Tpch, "region"), 3);
        assert_eq!(cols(Benchmark::Tpcds, "store_sales"), 23);
        assert_eq!(cols(Benchmark::Tpcds, "web_sales"), 34);
        assert_eq!(cols(Benchmark::Tpcds, "call_center"), 31);
        assert_eq!(cols(Benchmark::Tpcds, "date_dim"), 28);
        assert_eq!(cols(Benchmark::Ssb, "lineorder"), 17);
        assert_eq!(cols(Benchmark::Ssb, "dates"), 17);
    }

    #[test]
    fn flat_file_names() {
        assert_eq!(flat_file_name(Benchmark::Tpcds, "store_sales"), "store_sales.dat");
        assert_eq!(flat_file_name(Benchmark::Ssb, "lineorder"), "lineorder.tbl");
        assert_eq!(flat_file_name(Benchmark::Ssb, "dates"), "date.tbl");
    }

    #[test]
    fn benchmark_table_counts() {
        assert_eq!(Benchmark::Tpch.tables().len(), 8);
        assert_eq!(Benchmark::Tpcds.tables().len(), 24);
        assert_eq!(Benchmark::Ssb.tables().len(), 5);
    }
}
