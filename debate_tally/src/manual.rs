/*!

This is the long-form manual for `debate_tally` and `debatetally`.

## Input format

The input is a comma-separated file with a header row and one row per debate.

* Exactly one column holds the date of the debate. It is recognized by the
  word `Date` in its name (`Date`, `Debate Date`, ...).
* Every other column belongs to a candidate. A candidate may span several
  columns, one per debate round, by appending the round number in brackets:
  `Jane Doe [1]`, `Jane Doe [2]`. The marker is a single digit; it is removed
  and the remaining name is trimmed, so all the rounds are counted together.
* A cell lists the issues raised by the candidate during that round,
  separated by commas. Blank entries are ignored.

```text
Date,Jane Doe [1],Jane Doe [2],John Roe [1],John Roe [2]
2020-01-14,"Healthcare, Economy",Healthcare,Economy,
2020-02-07,Climate,,"Economy, Climate",Guns
```

## Output format

The output is a comma-separated file:

* the header `Date,Candidate,` followed by every issue, in reverse
  alphabetical order;
* one row per debate and candidate, with the number of times each issue was
  mentioned (`0` when it was not);
* a final row labeled `Total` with the sum of each issue column.

With the input above:

```text
Date,Candidate,Healthcare,Guns,Economy,Climate
2020-01-14,Jane Doe,2,0,1,0
2020-01-14,John Roe,0,0,1,0
2020-02-07,Jane Doe,0,0,0,1
2020-02-07,John Roe,0,1,1,1
,Total,2,1,3,2
```

Candidates appear in each debate in the order of their first column in the
header.

## Command line

```bash
debatetally                      # reads ./debate_data.csv, writes ./output.csv
debatetally -i debates.csv -o stdout
debatetally -c summary_config.json --reference expected.csv
```

The configuration file is a JSON object with the optional keys `inputPath`,
`outputPath` and `referencePath`. Relative paths are resolved from the
directory of the configuration file. Options given on the command line take
precedence.

When a reference file is provided, the output is compared to it and the run
fails if they differ.

## Errors

The run stops without writing anything when:
* the input cannot be read, or rows do not all have the same number of cells;
* there is no date column, or more than one;
* a computed count cannot be read back as an integer.

*/
