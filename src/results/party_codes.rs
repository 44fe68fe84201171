/// Maps the party codes that changed over the years to the current ones.
///
/// Unknown codes are kept as they are.
pub fn normalize_party(code: &str) -> String {
    let code = code.trim();
    let mapped = match code {
        "C" => "CRV",
        "D" => "DEM",
        "ENE" => "ENI",
        "GRE" => "GRN",
        "I" => "IND",
        "LIB" => "LBT",
        "LU" => "LBU",
        "NL" => "NLP",
        "NA" | "NAF" | "NON" | "NNE" | "N" | "UN" => "NPA",
        "NS" | "NSF" => "NSP",
        "O" | "OP" => "OTH",
        "FSL" => "SLF",
        "PAF" => "PFP",
        "PCN" => "PET",
        "PC" => "PAC",
        "R" => "REP",
        "SUS" => "SOC",
        other => other,
    };
    mapped.to_string()
}
