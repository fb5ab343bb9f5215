//! Display labels and value formatting.

use crate::present::RenameMap;

/// Maps raw result column identifiers to their display labels.
///
/// Keys are lowercase because the server folds unquoted identifiers.
pub fn column_labels() -> RenameMap {
    [
        ("nomepersonagem", "Nome do Personagem"),
        ("recompensa", "Recompensa"),
        ("nomebando", "Nome do Bando"),
        ("nomealianca", "Nome da Aliança"),
        ("nomenavio", "Nome do Navio"),
        ("alcunha", "Alcunha"),
        ("recompensaindividual", "Recompensa Individual"),
        ("recompensatotalbando", "Recompensa Total do Bando"),
        ("nomeespecie", "Espécie"),
        ("nomefruta", "Nome da Fruta"),
        ("tipofruta", "Tipo da Fruta"),
        ("recompensacombinada", "Recompensa Combinada"),
        ("rn", "Ranking"),
        ("tipoponeglyph", "Tipo do Poneglyph"),
        ("conteudo", "Conteúdo"),
        ("nomeilha", "Nome da Ilha"),
        ("nomearea", "Região"),
        ("afiliacao", "Afiliação"),
        ("qtd", "Contagem"),
        ("media", "Média"),
        ("mediana", "Mediana"),
        ("desvio", "Desvio Padrão"),
        ("minimo", "Mínimo"),
        ("maximo", "Máximo"),
        ("soma", "Soma"),
        ("posicao", "Posição"),
        ("grupo", "Grupo"),
        ("quantidade", "Quantidade"),
        ("limite_superior", "Limite Superior"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Formats a berry amount for the sidebar metrics, e.g. `B$ 5,000,000,000`.
pub fn format_berries(value: i64) -> String {
    format!("B$ {}", group_thousands(value))
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
