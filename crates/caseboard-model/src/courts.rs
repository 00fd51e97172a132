//! Static table of regional labor courts (TRT-1 … TRT-24).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub code: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub state_abbrev: &'static str,
    pub region: &'static str,
}

const fn court(
    code: &'static str,
    name: &'static str,
    state: &'static str,
    state_abbrev: &'static str,
    region: &'static str,
) -> Court {
    Court {
        code,
        name,
        state,
        state_abbrev,
        region,
    }
}

pub const COURTS: [Court; 24] = [
    court("01", "TRT da 1ª Região", "Rio de Janeiro", "RJ", "Sudeste"),
    court("02", "TRT da 2ª Região", "São Paulo", "SP", "Sudeste"),
    court("03", "TRT da 3ª Região", "Minas Gerais", "MG", "Sudeste"),
    court("04", "TRT da 4ª Região", "Rio Grande do Sul", "RS", "Sul"),
    court("05", "TRT da 5ª Região", "Bahia", "BA", "Nordeste"),
    court("06", "TRT da 6ª Região", "Pernambuco", "PE", "Nordeste"),
    court("07", "TRT da 7ª Região", "Ceará", "CE", "Nordeste"),
    court("08", "TRT da 8ª Região", "Pará", "PA", "Norte"),
    court("09", "TRT da 9ª Região", "Paraná", "PR", "Sul"),
    court("10", "TRT da 10ª Região", "Distrito Federal", "DF", "Centro-Oeste"),
    court("11", "TRT da 11ª Região", "Amazonas", "AM", "Norte"),
    court("12", "TRT da 12ª Região", "Santa Catarina", "SC", "Sul"),
    court("13", "TRT da 13ª Região", "Paraíba", "PB", "Nordeste"),
    court("14", "TRT da 14ª Região", "Rondônia", "RO", "Norte"),
    court("15", "TRT da 15ª Região", "São Paulo", "SP", "Sudeste"),
    court("16", "TRT da 16ª Região", "Maranhão", "MA", "Nordeste"),
    court("17", "TRT da 17ª Região", "Espírito Santo", "ES", "Sudeste"),
    court("18", "TRT da 18ª Região", "Goiás", "GO", "Centro-Oeste"),
    court("19", "TRT da 19ª Região", "Alagoas", "AL", "Nordeste"),
    court("20", "TRT da 20ª Região", "Sergipe", "SE", "Nordeste"),
    court("21", "TRT da 21ª Região", "Rio Grande do Norte", "RN", "Nordeste"),
    court("22", "TRT da 22ª Região", "Piauí", "PI", "Nordeste"),
    court("23", "TRT da 23ª Região", "Mato Grosso", "MT", "Centro-Oeste"),
    court("24", "TRT da 24ª Região", "Mato Grosso do Sul", "MS", "Centro-Oeste"),
];

/// Look up a 2-digit court code. Unknown codes (including `"00"`) yield `None`.
pub fn lookup_court(code: &str) -> Option<&'static Court> {
    COURTS.iter().find(|c| c.code == code)
}
