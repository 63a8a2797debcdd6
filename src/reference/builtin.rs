//! Built-in test table.
//!
//! Each definition carries the aliases that identify the test on a report
//! and a physiological sanity range. The sanity range only rejects numbers
//! that cannot possibly be a result for the test; it is not the clinical
//! reference range.

/// A known test: canonical key, lowercase aliases, physiological bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestDefinition {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    pub valid: (f64, f64),
}

const fn def(key: &'static str, aliases: &'static [&'static str], min: f64, max: f64) -> TestDefinition {
    TestDefinition {
        key,
        aliases,
        valid: (min, max),
    }
}

/// Default table. Order matters: it is the database insertion order, and
/// the first test whose alias appears in a label wins.
pub static BUILTIN_TESTS: &[TestDefinition] = &[
    // Thyroid
    def("TSH", &["tsh", "thyroid stimulating"], 0.01, 100.0),
    // Free fractions ahead of totals: "free t3" contains the bare "t3".
    def("FREE T3", &["free t3", "ft3"], 0.5, 20.0),
    def("FREE T4", &["free t4", "ft4"], 0.1, 10.0),
    def("TOTAL T3", &["serum t3", "tri-iodothyronine", "t3 total", "t3"], 0.1, 10.0),
    def("TOTAL T4", &["serum t4", "tetra-iodothyronine", "t4 total", "t4"], 0.5, 30.0),
    // Diabetes
    def("HBA1C", &["hba1c", "glycosylated"], 3.0, 20.0),
    def("MEAN PLASMA GLUCOSE", &["mean plasma glucose"], 50.0, 400.0),
    // Lipids
    def("CHOLESTEROL", &["cholesterol total", "serum cholesterol"], 50.0, 600.0),
    def("TRIGLYCERIDES", &["triglycerides", "serum triglycerides"], 10.0, 2000.0),
    def("HDL", &["hdl cholesterol", "serum hdl"], 5.0, 150.0),
    def("LDL", &["ldl cholesterol", "serum ldl"], 5.0, 400.0),
    // Electrolytes
    def("SODIUM", &["serum sodium", "sodium"], 100.0, 200.0),
    def("POTASSIUM", &["serum potassium", "potassium"], 1.0, 10.0),
    def("CHLORIDE", &["serum chloride", "chloride"], 60.0, 150.0),
    // Kidney
    def("CREATININE", &["serum creatinine", "creatinine"], 0.1, 25.0),
    def("UREA", &["blood urea", "serum urea"], 2.0, 300.0),
    def("BUN", &["blood urea nitrogen", "serum bun"], 1.0, 150.0),
    def("URIC ACID", &["serum uric acid", "uric acid"], 1.0, 20.0),
    // Liver
    def("SGPT", &["sgpt", "alt"], 1.0, 2000.0),
    def("SGOT", &["sgot", "ast"], 1.0, 2000.0),
    // Haematology
    def("HAEMOGLOBIN", &["haemoglobin", "hemoglobin"], 2.0, 25.0),
    def("WBC", &["total white blood", "wbc"], 500.0, 500_000.0),
    def("PLATELET", &["platelet count"], 5000.0, 1_000_000.0),
    def("ESR", &["esr", "erythrocyte sedimentation"], 0.0, 150.0),
    // Inflammation, vitamins
    def("CRP", &["c-reactive protein", "crp"], 0.0, 300.0),
    def("VITAMIN B12", &["vitamin b12", "cyanocobalamin"], 100.0, 2500.0),
];
