use serde::{Deserialize, Serialize};

/// A named topical thread.
///
/// One definition serves both halves of the tool set: `keywords` drives the
/// classifier's scoring, `documents` is the hand-curated identifier list the
/// backlink inserter consults. Either list may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadDef {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl ThreadDef {
    /// Whether this thread's curated document list contains `identifier`.
    pub fn contains_document(&self, identifier: &str) -> bool {
        self.documents.iter().any(|d| d == identifier)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Built-in thread set for the WANDA 2026 presentation corpus.
///
/// Used whenever the config file does not define its own `[[threads]]`
/// entries. Keyword lists are deliberately loose (substring matched, not
/// word-boundary aware).
pub fn default_threads() -> Vec<ThreadDef> {
    vec![
        ThreadDef {
            name: "AI_ML".to_string(),
            keywords: strings(&[
                "AI",
                "ML",
                "machine learning",
                "neural",
                "emulator",
                "Genesis",
                "DEIMOS",
                "EMU",
                "UQ_EMU",
                "ATLAS",
                "eigenvector",
                "STREAMLINE",
                "Bayesian",
                "deployment",
            ]),
            documents: strings(&[
                "Rare_Isotope_Beams",
                "InverseUncertaintyQuantificationwith_MachineL",
                "RECENT_DEPLOYMENT_OF_AI_ML_TOOLS",
                "UQ_EMU_Machine_Learning",
                "AI_ML_Experimental_Design",
                "AI_Program_Overview",
                "DEIMOS_BRAIN",
                "Sparse_Bayesian_Methods",
                "Dynamic_UQ_Bayesian_Model",
            ]),
        },
        ThreadDef {
            name: "Fission_Product_Yields".to_string(),
            keywords: strings(&[
                "FPY",
                "fission product",
                "yield",
                "CGMF",
                "FREYA",
                "cumulative",
                "independent",
                "fragment",
                "correlation",
                "anti-neutrino",
            ]),
            documents: strings(&[
                "FPY_Modeling",
                "Fission_Session_Overview",
                "FPY_Measurements",
                "FPY_Needs",
                "FPY_Correlations",
                "Uncertainty_Quantification_in_Fission_Fragmen",
                "Stockpile_Science_Fission",
                "ORNL_Inventory_UQ",
            ]),
        },
        ThreadDef {
            name: "Activation_Data".to_string(),
            keywords: strings(&[
                "activation",
                "cosmogenic",
                "PETALE",
                "micro",
                "CALDERA",
                "inventory",
                "transmutation",
                "cross section",
            ]),
            documents: strings(&[
                "High_Precision_Gamma_Ray_Decay_Data",
                "Inventory_Sub_Library",
                "MicroCALDERA_Active_Target",
                "Benchmarking_and_validating_cosmogenic_activa",
                "PETALE_Benchmark",
                "ORNL_Inventory_UQ",
            ]),
        },
    ]
}
