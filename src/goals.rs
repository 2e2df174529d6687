//! Built-in curriculum: the ordered learning goals for the vraag-en-aanbod
//! (supply and demand) unit.
//!
//! The order IS the curriculum sequence; the game walks it strictly front to
//! back and it never changes after startup.

/// Default learning goals, used when the TOML config does not provide its
/// own list.
pub fn default_learning_goals() -> Vec<String> {
  [
    "Effect van prijsverandering op de afzet uitleggen",
    "Betalingsbereidheid en afnemend grensnut",
    "Substitutiegoederen uitleggen",
    "Complementaire goederen uitleggen",
    "Collectief consumentensurplus berekenen en arceren",
    "Collectieve vraaglijn berekenen en tekenen",
    "Effect van prijsverandering op de vraag uitleggen en berekenen",
    "Factoren die de collectieve vraag beïnvloeden",
    "Elasticiteit van de vraag (Ev) berekenen",
    "Elastische vs inelastische vraag uitleggen",
    "Effect van prijsverandering op de omzet bij elastische en inelastische vraag",
    "Inkomenselasticiteit (Ei) berekenen",
    "Normale, inferieure en luxe goederen onderscheiden",
    "Vier productiefactoren en bijbehorende vergoedingen",
    "Verband tussen productie en arbeid",
    "Vaste en variabele kosten uitleggen",
    "Rekenen met TK, GTK, VK en MK",
    "Winstmaximalisatie berekenen en grafisch bepalen",
    "Break-even point berekenen en grafisch bepalen",
    "Verband collectieve marktprijs en individueel aanbod",
    "Producentensurplus berekenen en arceren",
    "Vraag- en aanbodlijn construeren vanuit formules",
    "Marktevenwicht berekenen en aflezen",
    "Oorzaken van verschuivingen van vraag- en aanbodlijn",
    "Verschil tussen verschuivingen en beweging langs lijnen",
    "Effect op marktevenwicht bij verschuiving van vraaglijn",
    "Effect op marktevenwicht bij verschuiving van aanbodlijn",
  ]
  .into_iter()
  .map(str::to_string)
  .collect()
}
