//! DDL for the pricing schema: the tables, indexes and views a deployment
//! uses to store and query contract extractions. Applied through the
//! container runtime's `psql`, statement group by statement group.

use log::info;

use crate::db::runtime::ContainerRuntime;
use crate::errors::FintermsResult;

pub const CREATE_SCHEMA_SQL: &str = r#"
CREATE SCHEMA IF NOT EXISTS pricing;
SET search_path TO pricing;
"#;

pub const CREATE_TABLES_SQL: &str = r#"
SET search_path TO pricing;

-- Main contract extractions table
CREATE TABLE IF NOT EXISTS contract_extractions (
    id SERIAL PRIMARY KEY,

    -- Searchable metadata fields
    document_title VARCHAR(500) NOT NULL,
    contract_type VARCHAR(100) NOT NULL,
    effective_date DATE,
    end_date DATE,
    total_pages INTEGER,
    governing_law VARCHAR(100),
    jurisdiction VARCHAR(100),

    -- Financial summary counts for quick queries
    total_base_compensation_count INTEGER DEFAULT 0,
    total_fees_count INTEGER DEFAULT 0,
    total_royalties_count INTEGER DEFAULT 0,
    total_equity_count INTEGER DEFAULT 0,
    total_expenses_count INTEGER DEFAULT 0,
    total_pricing_rules_count INTEGER DEFAULT 0,

    -- Financial flags for quick filtering
    has_tiered_structures BOOLEAN DEFAULT FALSE,
    has_commissions BOOLEAN DEFAULT FALSE,
    has_asset_based_fees BOOLEAN DEFAULT FALSE,
    multi_currency_flag BOOLEAN DEFAULT FALSE,
    primary_currency VARCHAR(10),

    -- Extraction quality metrics
    overall_confidence DECIMAL(3,2) CHECK (overall_confidence >= 0 AND overall_confidence <= 1),
    redacted_fields_count INTEGER DEFAULT 0,
    processing_warnings_count INTEGER DEFAULT 0,
    model_used VARCHAR(50),

    -- Full JSON preservation
    contract_metadata_json JSONB NOT NULL,
    financial_terms_json JSONB NOT NULL,
    pricing_rules_json JSONB NOT NULL,
    extraction_metadata_json JSONB NOT NULL,

    -- File and processing info
    source_file_path TEXT,
    source_file_name VARCHAR(255),
    source_file_size BIGINT,
    file_hash VARCHAR(64),

    extracted_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);

-- Contract parties, normalized for searching
CREATE TABLE IF NOT EXISTS contract_parties (
    id SERIAL PRIMARY KEY,
    contract_extraction_id INTEGER REFERENCES contract_extractions(id) ON DELETE CASCADE,

    entity_name VARCHAR(300) NOT NULL,
    entity_type VARCHAR(100),
    role VARCHAR(100),
    address TEXT,
    jurisdiction VARCHAR(100),
    normalized_name VARCHAR(300),

    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);

-- Contract fees, the most frequently queried financial data
CREATE TABLE IF NOT EXISTS contract_fees (
    id SERIAL PRIMARY KEY,
    contract_extraction_id INTEGER REFERENCES contract_extractions(id) ON DELETE CASCADE,

    fee_description TEXT NOT NULL,
    fee_type VARCHAR(100),
    amount_value TEXT,
    amount_currency VARCHAR(10),
    calculation_method TEXT,
    frequency VARCHAR(100),
    applies_to TEXT,

    is_tiered BOOLEAN DEFAULT FALSE,
    is_asset_based BOOLEAN DEFAULT FALSE,
    is_commission BOOLEAN DEFAULT FALSE,
    has_minimum BOOLEAN DEFAULT FALSE,
    has_maximum BOOLEAN DEFAULT FALSE,

    confidence_score DECIMAL(3,2),
    is_redacted BOOLEAN DEFAULT FALSE,

    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);

-- Pricing rules linked to contracts
CREATE TABLE IF NOT EXISTS pricing_rules (
    id SERIAL PRIMARY KEY,
    contract_extraction_id INTEGER REFERENCES contract_extractions(id) ON DELETE CASCADE,
    applies_to_fee_id INTEGER REFERENCES contract_fees(id) ON DELETE SET NULL,

    rule_name VARCHAR(200) NOT NULL,
    rule_description TEXT,
    rule_type VARCHAR(100),
    triggers TEXT,
    calculation_summary TEXT,
    applies_to TEXT,
    effective_period VARCHAR(200),

    system_implementable BOOLEAN DEFAULT TRUE,
    requires_approval BOOLEAN DEFAULT FALSE,
    priority INTEGER CHECK (priority >= 1 AND priority <= 10),

    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);

-- File processing tracking
CREATE TABLE IF NOT EXISTS extraction_jobs (
    id SERIAL PRIMARY KEY,
    contract_extraction_id INTEGER REFERENCES contract_extractions(id) ON DELETE SET NULL,

    file_path TEXT NOT NULL,
    file_name VARCHAR(255) NOT NULL,
    file_size BIGINT,
    file_hash VARCHAR(64),

    processing_status VARCHAR(50) DEFAULT 'pending',
    processing_started_at TIMESTAMP WITH TIME ZONE,
    processing_completed_at TIMESTAMP WITH TIME ZONE,
    processing_error TEXT,
    processing_time_seconds DECIMAL(10,3),

    model_used VARCHAR(50),
    retry_count INTEGER DEFAULT 0,

    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);
"#;

pub const CREATE_INDEXES_SQL: &str = r#"
SET search_path TO pricing;

CREATE INDEX IF NOT EXISTS idx_contract_extractions_type ON contract_extractions(contract_type);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_dates ON contract_extractions(effective_date, end_date);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_confidence ON contract_extractions(overall_confidence);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_created ON contract_extractions(created_at);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_file_hash ON contract_extractions(file_hash);

CREATE INDEX IF NOT EXISTS idx_contract_extractions_tiered ON contract_extractions(has_tiered_structures);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_commissions ON contract_extractions(has_commissions);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_currency ON contract_extractions(primary_currency);

CREATE INDEX IF NOT EXISTS idx_contract_parties_name ON contract_parties(entity_name);
CREATE INDEX IF NOT EXISTS idx_contract_parties_normalized ON contract_parties(normalized_name);
CREATE INDEX IF NOT EXISTS idx_contract_parties_role ON contract_parties(role);
CREATE INDEX IF NOT EXISTS idx_contract_parties_contract ON contract_parties(contract_extraction_id);

CREATE INDEX IF NOT EXISTS idx_contract_fees_type ON contract_fees(fee_type);
CREATE INDEX IF NOT EXISTS idx_contract_fees_currency ON contract_fees(amount_currency);
CREATE INDEX IF NOT EXISTS idx_contract_fees_characteristics ON contract_fees(is_tiered, is_asset_based, is_commission);
CREATE INDEX IF NOT EXISTS idx_contract_fees_contract ON contract_fees(contract_extraction_id);

CREATE INDEX IF NOT EXISTS idx_pricing_rules_type ON pricing_rules(rule_type);
CREATE INDEX IF NOT EXISTS idx_pricing_rules_contract ON pricing_rules(contract_extraction_id);
CREATE INDEX IF NOT EXISTS idx_pricing_rules_fee ON pricing_rules(applies_to_fee_id);

CREATE INDEX IF NOT EXISTS idx_extraction_jobs_hash ON extraction_jobs(file_hash);
CREATE INDEX IF NOT EXISTS idx_extraction_jobs_status ON extraction_jobs(processing_status);
CREATE INDEX IF NOT EXISTS idx_extraction_jobs_created ON extraction_jobs(created_at);

CREATE INDEX IF NOT EXISTS idx_contract_extractions_metadata_gin ON contract_extractions USING GIN (contract_metadata_json);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_financial_gin ON contract_extractions USING GIN (financial_terms_json);
CREATE INDEX IF NOT EXISTS idx_contract_extractions_pricing_gin ON contract_extractions USING GIN (pricing_rules_json);
"#;

pub const CREATE_VIEWS_SQL: &str = r#"
SET search_path TO pricing;

-- Contract summary view for analytics
CREATE OR REPLACE VIEW contract_summary AS
SELECT
    contract_type,
    COUNT(*) as total_contracts,
    AVG(overall_confidence) as avg_confidence,
    SUM(total_fees_count) as total_fee_structures,
    SUM(total_pricing_rules_count) as total_pricing_rules,
    COUNT(*) FILTER (WHERE has_tiered_structures = true) as contracts_with_tiers,
    COUNT(*) FILTER (WHERE has_commissions = true) as contracts_with_commissions,
    COUNT(*) FILTER (WHERE multi_currency_flag = true) as multi_currency_contracts
FROM contract_extractions
GROUP BY contract_type
ORDER BY total_contracts DESC;

-- Fee type analysis view
CREATE OR REPLACE VIEW fee_type_analysis AS
SELECT
    fee_type,
    COUNT(*) as frequency,
    AVG(confidence_score) as avg_confidence,
    COUNT(*) FILTER (WHERE is_tiered = true) as tiered_count,
    COUNT(*) FILTER (WHERE is_asset_based = true) as asset_based_count,
    COUNT(*) FILTER (WHERE is_commission = true) as commission_count
FROM contract_fees
WHERE fee_type IS NOT NULL
GROUP BY fee_type
ORDER BY frequency DESC;

-- Recent extractions view
CREATE OR REPLACE VIEW recent_extractions AS
SELECT
    ce.id,
    ce.document_title,
    ce.contract_type,
    ce.overall_confidence,
    ce.total_fees_count,
    ce.total_pricing_rules_count,
    ce.extracted_at,
    ej.processing_time_seconds
FROM contract_extractions ce
LEFT JOIN extraction_jobs ej ON ce.id = ej.contract_extraction_id
ORDER BY ce.extracted_at DESC
LIMIT 50;
"#;

/// Grants reference the configured application user, so they are rendered
/// rather than constant
pub fn grant_permissions_sql(user: &str) -> String {
    format!(
        r#"
GRANT USAGE ON SCHEMA pricing TO {user};
GRANT ALL PRIVILEGES ON ALL TABLES IN SCHEMA pricing TO {user};
GRANT ALL PRIVILEGES ON ALL SEQUENCES IN SCHEMA pricing TO {user};
"#
    )
}

/// Apply the full pricing schema: schema, tables, indexes, views, grants
pub async fn init_schema<R: ContainerRuntime>(runtime: &R, user: &str) -> FintermsResult<()> {
    info!("Creating schema...");
    runtime.run_sql(CREATE_SCHEMA_SQL).await?;

    info!("Creating tables...");
    runtime.run_sql(CREATE_TABLES_SQL).await?;

    info!("Creating indexes...");
    runtime.run_sql(CREATE_INDEXES_SQL).await?;

    info!("Creating views...");
    runtime.run_sql(CREATE_VIEWS_SQL).await?;

    info!("Setting permissions...");
    runtime.run_sql(&grant_permissions_sql(user)).await?;

    info!("Database schema created successfully");
    Ok(())
}
