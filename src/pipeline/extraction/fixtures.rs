//! Report texts shared by the extraction tests, shaped like real PDF text layers.

/// Booklet export with no RDW result.
pub const QUEBEC_BOOKLET: &str = "\
Carnet santé SHAYAN
Résultats de laboratoire
5 novembre 2024, 8 h 42
Prescripteur DR MARTIN
Laboratoire CHU DE QUEBEC
Hémogramme
Leucocytes
Valeur de référence
4,5 -  11 (10*9/L)5,87  10*9/L
Érythrocytes
Valeur de référence
4,2 - 5,8 (10*12/L)4,62  10*12/L
Hémoglobine
Valeur de référence
135 - 175 (g/L)137  g/L
Volume globulaire moyen
Valeur de référence
80 - 100 (fL)88,9  fL
Plaquettes
Valeur de référence
140 - 400 (10*9/L)191  10*9/L
Neutrophiles
Valeur de référence
1,8 - 7,7 (10*9/L)3,72  10*9/L
Monocytes
Valeur de référence
0,2 - 0,8 (10*9/L)0,38  10*9/L
NEUTROPHILES %
Valeur de référence
40 - 70 (%)63,31  %
LYMPHOCY TES %
Valeur de référence
22 - 44 (%)24,44  %
Hémoglobine glyquée
Valeur de référence
4 - 6 (%)5,4  %
";

/// Hospital report with a hematology section followed by biochemistry.
pub const TRADITIONAL_LAB: &str = "\
CENTRE HOSPITALIER UNIVERSITAIRE
PATIENT EXTERNE DUPONT, JEAN
Né(e)/DOB: 1970/03/14  Age: 54  Sex(e): M
Prescripteur DR MARTIN
PRÉLEVÉ/COLLECTED 2024/11/05 08:42
H E M A T O L O G I E
FSC / CBC
GB WBC 5.87 10^9/L 4.50-11.00 RADVS
GR RBC 4.62 10^12/L 4.20-5.80 RADVS
HB HGB 137 g/L 135-175 RADVS
HT HCT 0.41 L/L 0.40-0.50 RADVS
VGM MCV 88.9 fL 80.0-100.0 RADVS
TGMH MCH 29.7 pg 27.0-32.0 RADVS
CCMH MCHC 334 g/L 320-360 RADVS
DVE RDW 13.3 12.7-16.0 RADVS
PLAQ PLT 191 10^9/L 140-400 RADVS
VPM MPV 9.8 fL 7.4-10.4 RADVS
Neutrophiles abs. Auto 3.72 10^9/L 1.80-7.70 RADVS
Lymphocytes abs. Auto 1.43 10^9/L 1.00-4.00 RADVS
Monocytes abs. Auto 0.38 10^9/L 0.20-0.80 RADVS
Eosinophiles abs. Auto 0.28 10^9/L 0.00-0.50 RADVS
Basophiles abs. Auto 0.06 10^9/L 0.00-0.20 RADVS
Neutrophiles Rel. 63.31 % 40.00-70.00 RADVS
Lymphocytes Rel. 24.44 % 22.00-44.00 RADVS
Monocytes Rel. 6.47 % 2.00-10.00 RADVS
B I O C H I M I E
NA SODIUM 140 mmol/L 135-145
GLU GLUCOSE 5.2 mmol/L 3.6-6.0
";
